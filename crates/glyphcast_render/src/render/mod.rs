pub mod canvas;
pub mod markup;
pub mod raster;
