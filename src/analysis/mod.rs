pub mod health;
pub mod ndvi;
pub mod pipeline;
pub mod report;
pub mod scene;
