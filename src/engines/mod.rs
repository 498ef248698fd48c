pub mod scanning;
pub mod features;
pub mod scoring;
pub mod optimisation;
pub mod feedback;
pub mod design;
