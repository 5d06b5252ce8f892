pub mod decode;
pub mod signature;
