pub mod mapping;

pub use mapping::Entity as MappingEntity;
