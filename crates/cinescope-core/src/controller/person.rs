use super::{publish, PERSON_UNAVAILABLE};
use crate::repository::PersonRepository;
use crate::state::Slot;
use cinescope_models::{Person, PersonCastCredit};

pub struct PersonController {
    people: PersonRepository,
    pub details: Slot<Person>,
    /// Movie credits, most popular first
    pub credits: Slot<Vec<PersonCastCredit>>,
}

impl PersonController {
    pub fn new(people: PersonRepository) -> Self {
        Self {
            people,
            details: Slot::new(),
            credits: Slot::new(),
        }
    }

    pub async fn load(&self, id: i64) {
        self.details.loading();
        self.credits.loading();

        let (details, credits) = tokio::join!(self.people.details(id), self.people.movie_credits(id));

        publish(&self.details, "person details", details, PERSON_UNAVAILABLE);
        publish(
            &self.credits,
            "person credits",
            credits.map(|c| c.by_popularity().cast),
            PERSON_UNAVAILABLE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::UiState;
    use crate::testing::FakeCatalog;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_credits_sorted_by_popularity() {
        let controller = PersonController::new(PersonRepository::new(Arc::new(FakeCatalog::new())));

        controller.load(1373737).await;

        let credits = controller.credits.current();
        let ids: Vec<i64> = credits.success().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(
            controller.details.current().success().map(|p| p.name.as_str()),
            Some("Florence Pugh")
        );
    }

    #[tokio::test]
    async fn test_credit_failure_keeps_details() {
        let fake = FakeCatalog::new().failing("person_movie_credits");
        let controller = PersonController::new(PersonRepository::new(Arc::new(fake)));

        controller.load(1).await;

        assert_eq!(
            controller.credits.current(),
            UiState::Error(PERSON_UNAVAILABLE.to_string())
        );
        assert!(controller.details.current().success().is_some());
    }
}
