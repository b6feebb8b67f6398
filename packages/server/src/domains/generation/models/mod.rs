pub mod persona;

pub use persona::PersonaProfile;
