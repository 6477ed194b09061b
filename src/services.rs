pub mod occupancy_service;
pub use occupancy_service::OccupancyService;
pub mod poste_order;
pub mod attendance_service;
pub use attendance_service::AttendanceService;
pub mod backup_service;
pub use backup_service::BackupService;
pub mod poste_service;
pub use poste_service::PosteService;
pub mod operator_service;
pub use operator_service::OperatorService;
