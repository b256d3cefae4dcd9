pub mod jolpica;
pub mod results;
pub mod season;
pub mod sessions;
pub mod status;
pub mod time_format;
pub mod weekend;
