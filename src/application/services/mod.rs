mod ingestion;
mod qa;

#[cfg(test)]
pub(crate) mod test_support;

pub use ingestion::IngestionService;
pub use qa::DocumentQa;
