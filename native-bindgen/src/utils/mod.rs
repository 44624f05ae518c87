pub(crate) mod edition;
pub(crate) mod jsonl;
