pub mod block_mean;
pub mod raster;
pub mod region;
pub mod snap;
