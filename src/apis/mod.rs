pub mod exoplanet_eu;

pub use exoplanet_eu::ExoplanetEuCatalog;
