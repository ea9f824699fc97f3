pub mod simulation_parameters;
pub mod simulation_result;

pub use simulation_parameters::SimulationParameters;
pub use simulation_result::SimulationResult;
