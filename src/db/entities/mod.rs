//! SeaORM entities mapping to the database tables.

pub mod incident;
pub mod latency_sample;
pub mod target;

// Prelude module for easy importing of all entities and their related types
pub mod prelude {
    pub use super::target::Entity as Target;
    pub use super::target::Model as TargetModel;
    pub use super::target::ActiveModel as TargetActiveModel;
    pub use super::target::Column as TargetColumn;

    pub use super::latency_sample::Entity as LatencySample;
    pub use super::latency_sample::Model as LatencySampleModel;
    pub use super::latency_sample::ActiveModel as LatencySampleActiveModel;
    pub use super::latency_sample::Column as LatencySampleColumn;

    pub use super::incident::Entity as Incident;
    pub use super::incident::Model as IncidentModel;
    pub use super::incident::ActiveModel as IncidentActiveModel;
    pub use super::incident::Column as IncidentColumn;
}
