pub mod connection;
pub mod family;
pub mod photo;
pub mod preference;
pub mod profile;
pub mod user;

pub use connection::ConnectionRecord;
pub use family::FamilyDetailRecord;
pub use photo::PhotoRecord;
pub use preference::PreferenceRecord;
pub use profile::ProfileRecord;
pub use user::UserAccount;
