pub mod animate;
pub mod dataset;
pub mod descent;
pub mod fit;
pub mod net;
pub mod plots;
