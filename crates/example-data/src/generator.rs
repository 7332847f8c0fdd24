//! Deterministic project generation from seed definitions.
//!
//! The same seed definition always produces identical projects, tasks, and
//! identifiers.

use fake::Fake;
use fake::faker::company::raw::{BsNoun, BsVerb, CatchPhrase, Industry};
use fake::faker::lorem::raw::Sentence;
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::{ExampleProjectSeed, ExampleTaskSeed, ProjectStatusSeed, TaskStatusSeed};
use crate::validation::{is_valid_title, normalise_title};

/// Maximum number of attempts to generate a valid title.
const MAX_TITLE_ATTEMPTS: usize = 100;

/// Maximum number of tasks generated per project.
const MAX_TASKS: usize = 4;

/// Oldest generated project, in days before seeding.
const MAX_AGE_DAYS: u32 = 90;

/// Budgets are whole multiples of this amount.
const BUDGET_STEP: u64 = 50;

/// Largest budget multiple.
const MAX_BUDGET_STEPS: u64 = 40;

const PROJECT_KINDS: &[&str] = &[
    "Site Revamp",
    "Brand Refresh",
    "Mobile App",
    "Landing Page",
    "Data Dashboard",
    "Onboarding Flow",
    "Newsletter Campaign",
    "API Integration",
];

const TASK_STATUSES: &[TaskStatusSeed] = &[
    TaskStatusSeed::Open,
    TaskStatusSeed::InProgress,
    TaskStatusSeed::Completed,
];

/// Generates example projects from a seed definition.
///
/// Uses the seed's `seed` value to initialise a deterministic RNG. Each
/// generated project has:
///
/// - A deterministic UUID
/// - A title satisfying [`is_valid_title`]
/// - An owning client drawn from the registry
/// - A status (~70% active, ~20% completed, ~10% archived)
/// - Up to four tasks with budgets in steps of fifty
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - Title generation fails after maximum retries
/// - The registry has no client identifiers
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_projects};
///
/// let json = r#"{
///     "version": 1,
///     "clientIds": ["client1"],
///     "seeds": [{"name": "test", "seed": 42, "projectCount": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let projects = generate_example_projects(&registry, seed_def).expect("generated");
///
/// assert_eq!(projects.len(), 3);
/// let again = generate_example_projects(&registry, seed_def).expect("generated");
/// assert_eq!(projects, again);
/// ```
pub fn generate_example_projects(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<Vec<ExampleProjectSeed>, GenerationError> {
    if registry.client_ids().is_empty() {
        return Err(GenerationError::NoClientIds);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let mut projects = Vec::with_capacity(seed_def.project_count());

    for _ in 0..seed_def.project_count() {
        projects.push(generate_single_project(&mut rng, registry)?);
    }

    Ok(projects)
}

fn generate_single_project(
    rng: &mut ChaCha8Rng,
    registry: &SeedRegistry,
) -> Result<ExampleProjectSeed, GenerationError> {
    let id = Uuid::from_u128(rng.random());

    let title = generate_title(rng, |rng| {
        let industry: String = Industry(EN).fake_with_rng(rng);
        let kind = PROJECT_KINDS.choose(rng).copied().unwrap_or("Project");
        format!("{industry} {kind}")
    })?;
    let description: String = CatchPhrase(EN).fake_with_rng(rng);

    let client_id = registry
        .client_ids()
        .choose(rng)
        .cloned()
        .ok_or(GenerationError::NoClientIds)?;

    let status = match rng.random_range(0..10_u32) {
        0..=6 => ProjectStatusSeed::Active,
        7..=8 => ProjectStatusSeed::Completed,
        _ => ProjectStatusSeed::Archived,
    };
    let age_days = rng.random_range(0..=MAX_AGE_DAYS);

    let task_count = rng.random_range(0..=MAX_TASKS);
    let tasks = (0..task_count)
        .map(|_| generate_single_task(rng))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ExampleProjectSeed {
        id,
        title,
        description,
        client_id,
        status,
        age_days,
        tasks,
    })
}

fn generate_single_task(rng: &mut ChaCha8Rng) -> Result<ExampleTaskSeed, GenerationError> {
    let id = Uuid::from_u128(rng.random());
    let title = generate_title(rng, |rng| {
        let verb: String = BsVerb(EN).fake_with_rng(rng);
        let noun: String = BsNoun(EN).fake_with_rng(rng);
        format!("{} {noun}", capitalise(&verb))
    })?;
    let description: String = Sentence(EN, 6..12).fake_with_rng(rng);
    let budget = rng.random_range(1..=MAX_BUDGET_STEPS) * BUDGET_STEP;
    let status = TASK_STATUSES.choose(rng).copied().unwrap_or_default();

    Ok(ExampleTaskSeed {
        id,
        title,
        description,
        budget,
        status,
    })
}

/// Draws candidates until one normalises into a valid title.
fn generate_title(
    rng: &mut ChaCha8Rng,
    mut candidate: impl FnMut(&mut ChaCha8Rng) -> String,
) -> Result<String, GenerationError> {
    for _ in 0..MAX_TITLE_ATTEMPTS {
        let title = normalise_title(&candidate(rng));
        if is_valid_title(&title) {
            return Ok(title);
        }
    }

    Err(GenerationError::TitleGenerationFailed {
        max_attempts: MAX_TITLE_ATTEMPTS,
    })
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::{fixture, rstest};

    use super::*;

    const TEST_REGISTRY_JSON: &str = r#"{
        "version": 1,
        "clientIds": ["client1", "client2", "client3"],
        "seeds": [
            {"name": "test-seed", "seed": 42, "projectCount": 12},
            {"name": "small-seed", "seed": 123, "projectCount": 2},
            {"name": "empty-seed", "seed": 7, "projectCount": 0}
        ]
    }"#;

    #[fixture]
    fn test_registry() -> SeedRegistry {
        SeedRegistry::from_json(TEST_REGISTRY_JSON).expect("valid test registry")
    }

    fn generate(registry: &SeedRegistry, name: &str) -> Vec<ExampleProjectSeed> {
        let seed_def = registry.find_seed(name).expect("seed should be found");
        generate_example_projects(registry, seed_def).expect("generation should succeed")
    }

    #[rstest]
    #[case("test-seed", 12)]
    #[case("small-seed", 2)]
    #[case("empty-seed", 0)]
    fn generates_requested_project_count(
        test_registry: SeedRegistry,
        #[case] name: &str,
        #[case] expected: usize,
    ) {
        assert_eq!(generate(&test_registry, name).len(), expected);
    }

    #[rstest]
    fn generation_is_deterministic(test_registry: SeedRegistry) {
        assert_eq!(
            generate(&test_registry, "test-seed"),
            generate(&test_registry, "test-seed")
        );
    }

    #[rstest]
    fn different_seeds_produce_different_projects(test_registry: SeedRegistry) {
        let first = generate(&test_registry, "test-seed");
        let second = generate(&test_registry, "small-seed");

        assert_ne!(first.first().map(|p| p.id), second.first().map(|p| p.id));
    }

    #[rstest]
    fn identifiers_are_unique(test_registry: SeedRegistry) {
        let projects = generate(&test_registry, "test-seed");
        let mut seen = HashSet::new();
        for project in &projects {
            assert!(seen.insert(project.id), "duplicate project id");
            for task in &project.tasks {
                assert!(seen.insert(task.id), "duplicate task id");
            }
        }
    }

    #[rstest]
    fn generated_fields_respect_constraints(test_registry: SeedRegistry) {
        let clients: HashSet<_> = test_registry.client_ids().iter().collect();

        for project in generate(&test_registry, "test-seed") {
            assert!(is_valid_title(&project.title), "bad title: {}", project.title);
            assert!(!project.description.trim().is_empty());
            assert!(clients.contains(&project.client_id));
            assert!(project.age_days <= MAX_AGE_DAYS);
            assert!(project.tasks.len() <= MAX_TASKS);
            for task in &project.tasks {
                assert!(is_valid_title(&task.title), "bad task title: {}", task.title);
                assert!(!task.description.trim().is_empty());
                assert_eq!(task.budget % BUDGET_STEP, 0);
                assert!((BUDGET_STEP..=BUDGET_STEP * MAX_BUDGET_STEPS).contains(&task.budget));
            }
        }
    }

    #[test]
    fn rejects_registry_without_clients() {
        let json = r#"{
            "version": 1,
            "clientIds": [],
            "seeds": [{"name": "test", "seed": 1, "projectCount": 1}]
        }"#;
        let registry = SeedRegistry::from_json(json).expect("valid registry");
        let seed_def = registry.find_seed("test").expect("seed found");

        assert_eq!(
            generate_example_projects(&registry, seed_def),
            Err(GenerationError::NoClientIds)
        );
    }

    #[rstest]
    #[case("implement", "Implement")]
    #[case("é", "É")]
    #[case("", "")]
    fn capitalise_uppercases_first_letter(#[case] word: &str, #[case] expected: &str) {
        assert_eq!(capitalise(word), expected);
    }

    #[test]
    fn exhausted_title_attempts_fail() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = generate_title(&mut rng, |_| "ab".to_owned());

        assert_eq!(
            result,
            Err(GenerationError::TitleGenerationFailed {
                max_attempts: MAX_TITLE_ATTEMPTS
            })
        );
    }
}
