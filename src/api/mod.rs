// Export submodules
pub mod clients;
