//! Pure decision tables: segmentation, plan pricing, media-kit estimates,
//! profile tips and the plan gate. Nothing in here touches the database.

pub mod estimator;
pub mod gate;
pub mod plan;
pub mod segment;
pub mod tips;
