pub mod identity;

pub use identity::InMemoryIdentityRepository;
