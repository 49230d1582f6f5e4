/// Answer used whenever nothing grounded can be said
pub const UNKNOWN_ANSWER: &str = "I don't know.";

const CONTEXT_SEPARATOR: &str = "\n\n";

/// Build the grounded prompt from context chunks (best first) and the question
#[must_use]
pub fn build_prompt<S: AsRef<str>>(context: &[S], question: &str) -> String {
    let context_block = context
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR);

    format!(
        "You are a helpful assistant.\n\
         Answer the question ONLY using the context below.\n\
         If the answer is not in the context, say \"I don't know\".\n\
         \n\
         Context:\n\
         {context_block}\n\
         \n\
         Question:\n\
         {question}\n\
         \n\
         Answer:"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prompt_layout() {
        let prompt = build_prompt(&["first chunk", "second chunk"], "What is RAG?");
        let expected = "You are a helpful assistant.\n\
Answer the question ONLY using the context below.\n\
If the answer is not in the context, say \"I don't know\".\n\
\n\
Context:\n\
first chunk\n\
\n\
second chunk\n\
\n\
Question:\n\
What is RAG?\n\
\n\
Answer:";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn single_chunk_has_no_separator() {
        let prompt = build_prompt(&[String::from("only")], "q");
        assert!(prompt.contains("Context:\nonly\n\nQuestion:\nq\n\nAnswer:"));
    }
}
