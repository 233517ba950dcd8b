pub mod company;
pub mod identity;
pub mod specialty;
pub mod user;

pub use company::{Company, CompanyStatus, NewCompany};
pub use identity::AuthIdentity;
pub use specialty::Specialty;
pub use user::{NewUser, UserRole};
