use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(
        "Connected component of {size} chains exceeds the search limit of {limit} chains \
         ({chains}); reduce the number of alternate chains or raise the limit"
    )]
    ComponentTooLarge {
        size: usize,
        limit: usize,
        chains: String,
    },

    #[error("Chains that must always be kept clash with each other: {chains}")]
    UnresolvableClash { chains: String },
}
