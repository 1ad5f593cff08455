//! Store traits: the boundary behind which persistence collaborators sit.
//!
//! The core assumes nothing about storage technology — only that these
//! operations are available synchronously and that identifiers are stable
//! once assigned. `save` is insert-or-update; `delete` reports whether the
//! record existed. Implementations must be safe to share across threads.

use videoshop_catalog::Movie;
use videoshop_core::{DomainResult, MovieId, RentalId, UserId};
use videoshop_members::User;

use crate::rental::Rental;

pub trait MovieStore: Send + Sync {
    fn get_by_id(&self, id: MovieId) -> DomainResult<Option<Movie>>;
    fn get_all(&self) -> DomainResult<Vec<Movie>>;
    fn save(&self, movie: Movie) -> DomainResult<()>;
    fn delete(&self, id: MovieId) -> DomainResult<bool>;
}

pub trait UserStore: Send + Sync {
    fn get_by_id(&self, id: UserId) -> DomainResult<Option<User>>;
    /// Look a user up by family name (first match).
    fn get_by_name(&self, name: &str) -> DomainResult<Option<User>>;
    fn get_all(&self) -> DomainResult<Vec<User>>;
    fn save(&self, user: User) -> DomainResult<()>;
    fn delete(&self, id: UserId) -> DomainResult<bool>;
}

pub trait RentalStore: Send + Sync {
    fn get_by_id(&self, id: RentalId) -> DomainResult<Option<Rental>>;
    /// All rentals, oldest first.
    fn get_all(&self) -> DomainResult<Vec<Rental>>;
    fn save(&self, rental: Rental) -> DomainResult<()>;
    fn delete(&self, id: RentalId) -> DomainResult<bool>;
}
