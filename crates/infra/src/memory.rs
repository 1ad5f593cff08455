//! In-memory stores for tests/dev.
//!
//! Plain `RwLock<HashMap>` maps keyed by entity id. `get_all` returns
//! entities sorted by id; ids are time-ordered, so that is creation order.
//! Lock poisoning surfaces as [`DomainError::Storage`] rather than a panic.

use std::collections::HashMap;
use std::sync::RwLock;

use videoshop_catalog::Movie;
use videoshop_core::{DomainError, DomainResult, MovieId, RentalId, UserId};
use videoshop_members::User;
use videoshop_rental::{MovieStore, Rental, RentalStore, UserStore};

fn poisoned<E>(_: E) -> DomainError {
    DomainError::storage("store lock poisoned")
}

/// In-memory movie store.
#[derive(Debug, Default)]
pub struct InMemoryMovieStore {
    movies: RwLock<HashMap<MovieId, Movie>>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MovieStore for InMemoryMovieStore {
    fn get_by_id(&self, id: MovieId) -> DomainResult<Option<Movie>> {
        let movies = self.movies.read().map_err(poisoned)?;
        Ok(movies.get(&id).cloned())
    }

    fn get_all(&self) -> DomainResult<Vec<Movie>> {
        let movies = self.movies.read().map_err(poisoned)?;
        let mut all: Vec<Movie> = movies.values().cloned().collect();
        all.sort_by_key(Movie::id_typed);
        Ok(all)
    }

    fn save(&self, movie: Movie) -> DomainResult<()> {
        let mut movies = self.movies.write().map_err(poisoned)?;
        movies.insert(movie.id_typed(), movie);
        Ok(())
    }

    fn delete(&self, id: MovieId) -> DomainResult<bool> {
        let mut movies = self.movies.write().map_err(poisoned)?;
        Ok(movies.remove(&id).is_some())
    }
}

/// In-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn get_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(&id).cloned())
    }

    fn get_by_name(&self, name: &str) -> DomainResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        let mut all: Vec<&User> = users.values().collect();
        all.sort_by_key(|u| u.id_typed());
        Ok(all.into_iter().find(|u| u.name() == name).cloned())
    }

    fn get_all(&self) -> DomainResult<Vec<User>> {
        let users = self.users.read().map_err(poisoned)?;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(User::id_typed);
        Ok(all)
    }

    fn save(&self, user: User) -> DomainResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;
        users.insert(user.id_typed(), user);
        Ok(())
    }

    fn delete(&self, id: UserId) -> DomainResult<bool> {
        let mut users = self.users.write().map_err(poisoned)?;
        Ok(users.remove(&id).is_some())
    }
}

/// In-memory rental store.
#[derive(Debug, Default)]
pub struct InMemoryRentalStore {
    rentals: RwLock<HashMap<RentalId, Rental>>,
}

impl InMemoryRentalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RentalStore for InMemoryRentalStore {
    fn get_by_id(&self, id: RentalId) -> DomainResult<Option<Rental>> {
        let rentals = self.rentals.read().map_err(poisoned)?;
        Ok(rentals.get(&id).cloned())
    }

    fn get_all(&self) -> DomainResult<Vec<Rental>> {
        let rentals = self.rentals.read().map_err(poisoned)?;
        let mut all: Vec<Rental> = rentals.values().cloned().collect();
        all.sort_by_key(Rental::id_typed);
        Ok(all)
    }

    fn save(&self, rental: Rental) -> DomainResult<()> {
        let mut rentals = self.rentals.write().map_err(poisoned)?;
        rentals.insert(rental.id_typed(), rental);
        Ok(())
    }

    fn delete(&self, id: RentalId) -> DomainResult<bool> {
        let mut rentals = self.rentals.write().map_err(poisoned)?;
        Ok(rentals.remove(&id).is_some())
    }
}
