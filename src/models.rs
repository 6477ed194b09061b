pub mod poste;
pub mod operator;
pub mod attendance;
pub mod backup;
pub mod occupancy;
