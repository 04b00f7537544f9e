// Corpus input: documents as handed over by the acquisition/cleaning side.

pub mod document;
pub mod loader;
