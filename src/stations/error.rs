use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SpatialJoinError {
    #[error("Reference point set is empty, there is no nearest neighbour to join against")]
    EmptyReferenceSet,
}
