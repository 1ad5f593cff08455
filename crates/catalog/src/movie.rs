use std::sync::Arc;

use chrono::NaiveDate;

use videoshop_core::{DomainError, DomainResult, Entity, MovieId};
use videoshop_pricing::{CategoryRegistry, PriceCategory};

/// Maximum length of a movie title, in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Entity: a movie in the catalog.
///
/// The identifier is assigned when the movie is constructed and never
/// changes. The `rented` flag tracks whether exactly one active rental
/// currently references this movie; only the rental orchestration flips it.
#[derive(Debug, Clone)]
pub struct Movie {
    id: MovieId,
    title: String,
    release_date: NaiveDate,
    price_category: Arc<dyn PriceCategory>,
    age_rating: u32,
    rented: bool,
}

impl Movie {
    /// Create a movie with an already-resolved price category.
    pub fn new(
        title: impl Into<String>,
        release_date: NaiveDate,
        price_category: Arc<dyn PriceCategory>,
        age_rating: u32,
    ) -> DomainResult<Self> {
        let title = title.into();
        check_title(&title)?;
        Ok(Self {
            id: MovieId::new(),
            title,
            release_date,
            price_category,
            age_rating,
            rented: false,
        })
    }

    /// Create a movie from a category identifier, resolved through the
    /// registry. Unknown identifiers fail here, at movie-creation time.
    pub fn create(
        registry: &CategoryRegistry,
        title: impl Into<String>,
        release_date: NaiveDate,
        category_id: &str,
        age_rating: u32,
    ) -> DomainResult<Self> {
        let price_category = registry.resolve(category_id)?;
        Self::new(title, release_date, price_category, age_rating)
    }

    pub fn id_typed(&self) -> MovieId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn release_date(&self) -> NaiveDate {
        self.release_date
    }

    pub fn price_category(&self) -> &Arc<dyn PriceCategory> {
        &self.price_category
    }

    pub fn age_rating(&self) -> u32 {
        self.age_rating
    }

    pub fn is_rented(&self) -> bool {
        self.rented
    }

    /// Flip the availability flag. Called by the rental orchestration, which
    /// serializes all callers per movie.
    pub fn set_rented(&mut self, rented: bool) {
        self.rented = rented;
    }

    /// Re-categorize the movie (e.g. a new release aging into the back
    /// catalog).
    pub fn set_price_category(&mut self, price_category: Arc<dyn PriceCategory>) {
        self.price_category = price_category;
    }
}

fn check_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(DomainError::validation(format!(
            "title cannot exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

impl Entity for Movie {
    type Id = MovieId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// Categories are stateless shared instances, so two movies are equal when
// their categories carry the same name.
impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.release_date == other.release_date
            && self.price_category.name() == other.price_category.name()
            && self.age_rating == other.age_rating
            && self.rented == other.rented
    }
}

impl Eq for Movie {}

#[cfg(test)]
mod tests {
    use super::*;
    use videoshop_pricing::Regular;

    fn release() -> NaiveDate {
        NaiveDate::from_ymd_opt(1997, 12, 19).unwrap()
    }

    fn movie(title: &str) -> DomainResult<Movie> {
        Movie::new(title, release(), Arc::new(Regular), 12)
    }

    #[test]
    fn new_movie_starts_available() {
        let m = movie("Titanic").unwrap();
        assert!(!m.is_rented());
        assert_eq!(m.title(), "Titanic");
        assert_eq!(m.age_rating(), 12);
        assert_eq!(m.price_category().name(), "Regular");
    }

    #[test]
    fn rejects_empty_title() {
        let err = movie("   ").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn rejects_overlong_title() {
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        let err = movie(&long).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let just_fits = "x".repeat(MAX_TITLE_LENGTH);
        assert!(movie(&just_fits).is_ok());
    }

    #[test]
    fn create_resolves_category_through_registry() {
        let registry = CategoryRegistry::with_defaults();
        let m = Movie::create(&registry, "Avatar", release(), "New Release", 12).unwrap();
        assert_eq!(m.price_category().name(), "New Release");
    }

    #[test]
    fn create_fails_on_unknown_category() {
        let registry = CategoryRegistry::with_defaults();
        let err = Movie::create(&registry, "Avatar", release(), "Gold", 12).unwrap_err();
        assert_eq!(err, DomainError::UnknownCategory("Gold".to_string()));
    }

    #[test]
    fn fresh_movies_get_distinct_ids() {
        let a = movie("Titanic").unwrap();
        let b = movie("Titanic").unwrap();
        assert_ne!(a.id_typed(), b.id_typed());
    }
}
