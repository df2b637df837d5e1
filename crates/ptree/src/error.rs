use rhizome_ptree_sexpr::SerializeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("{owner}#{method}: {source}")]
    Method {
        owner: String,
        method: String,
        #[source]
        source: SerializeError,
    },

    #[error("no such type: {0}")]
    NoSuchType(String),
}
