pub mod poste_repo;
pub use poste_repo::PosteRepository;
pub mod operator_repo;
pub use operator_repo::OperatorRepository;
pub mod attendance_repo;
pub use attendance_repo::AttendanceRepository;
pub mod backup_repo;
pub use backup_repo::BackupRepository;
pub mod occupancy_repo;
pub use occupancy_repo::{OccupancyRepository, OccupancySource};
