//! Seeded randomized checks of the rotation laws.
//!
//! Each committed calendar is replayed slot by slot against the starting
//! catalog to confirm every choice was legal at the time it was made.

use std::collections::{HashMap, VecDeque};

use chrono::{Duration, NaiveDate, NaiveDateTime, Weekday};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{RunRequest, Scheduler};
use crate::models::{Availability, Episode, Show, ShowId, SpecialDay};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 11).unwrap()
}

fn random_catalog(rng: &mut SmallRng) -> Vec<Show> {
    let base = monday().and_hms_opt(0, 0, 0).unwrap();
    let count = rng.random_range(3..7);
    (0..count)
        .map(|i| {
            let name = format!("S{i}");
            let mut show = Show::new(name.as_str()).with_priority(rng.random_range(0..3));
            for n in 1..=rng.random_range(2..10) {
                let mut episode = Episode::numbered(name.as_str(), n);
                if rng.random_bool(0.25) {
                    let offset = Duration::hours(rng.random_range(0..24 * 10));
                    episode = episode.with_release(base + offset);
                }
                if rng.random_bool(0.1) {
                    episode = episode.with_availability(Availability::on_weekdays([Weekday::Fri, Weekday::Sat]));
                }
                show = show.with_episode(episode);
            }
            show
        })
        .collect()
}

fn build(catalog: &[Show]) -> Scheduler {
    let mut scheduler = Scheduler::default();
    for show in catalog {
        scheduler.register_show(show.clone()).unwrap();
    }
    scheduler.register_special_day(
        SpecialDay::new(monday() + Duration::days(9))
            .with_lunch_slot()
            .with_dinner_slot(),
    );
    scheduler
}

/// Replays the committed calendar and asserts availability, queue order,
/// recency and priority tie-breaking for every assignment.
fn assert_rotation_laws(catalog: &[Show], scheduler: &Scheduler) {
    let mut queues: HashMap<ShowId, VecDeque<Episode>> = catalog
        .iter()
        .map(|show| (show.id.clone(), show.episodes().cloned().collect()))
        .collect();
    let mut last: HashMap<ShowId, NaiveDateTime> = HashMap::new();

    for day in scheduler.calendar().iter() {
        for slot in day.slots() {
            let Some(chosen) = slot.episode() else {
                continue;
            };
            assert!(chosen.is_available(slot.time), "{} at {}", chosen.display_name(), slot.time);
            if let Some(release) = chosen.release {
                assert!(slot.time >= release);
            }

            let head = queues.get_mut(&chosen.show).unwrap().pop_front().unwrap();
            assert_eq!(&head, chosen, "episodes leave the queue front first");

            let chosen_show = scheduler.show(&chosen.show).unwrap();
            let chosen_last = last.get(&chosen.show).copied();
            for rival in catalog.iter().filter(|show| show.id != chosen.show) {
                let eligible = queues[&rival.id]
                    .front()
                    .is_some_and(|ep| ep.is_available(slot.time));
                if !eligible {
                    continue;
                }
                let rival_last = last.get(&rival.id).copied();
                assert!(
                    rival_last >= chosen_last,
                    "{} was absent longer than {} at {}",
                    rival.id,
                    chosen.show,
                    slot.time
                );
                if rival_last == chosen_last {
                    assert!(rival.priority >= chosen_show.priority);
                }
            }
            last.insert(chosen.show.clone(), slot.time);
        }
    }
}

#[test]
fn test_random_catalogs_obey_rotation_laws() {
    for seed in 0..40 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let catalog = random_catalog(&mut rng);
        for stop in [false, true] {
            let mut scheduler = build(&catalog);
            let request = RunRequest::new(monday())
                .until(monday() + Duration::days(27))
                .with_stop_at_first_exhausted_show(stop);
            scheduler.generate(&request).unwrap();
            assert_rotation_laws(&catalog, &scheduler);
        }
    }
}

#[test]
fn test_random_split_runs_match_single_run() {
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let catalog = random_catalog(&mut rng);
        let end = monday() + Duration::days(20);
        let split = monday() + Duration::days(rng.random_range(0..20));

        let mut single = build(&catalog);
        single
            .generate(
                &RunRequest::new(monday())
                    .until(end)
                    .with_stop_at_first_exhausted_show(false),
            )
            .unwrap();

        let mut resumed = build(&catalog);
        let first = resumed
            .generate(
                &RunRequest::new(monday())
                    .until(split)
                    .with_stop_at_first_exhausted_show(false),
            )
            .unwrap();
        resumed
            .generate(
                &RunRequest::new(first.stopped_at.max(monday()))
                    .until(end)
                    .with_stop_at_first_exhausted_show(false),
            )
            .unwrap();

        assert_eq!(single.calendar(), resumed.calendar(), "seed {seed}");
    }
}

#[test]
fn test_random_clear_restores_sorted_queues() {
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let catalog = random_catalog(&mut rng);
        let mut scheduler = build(&catalog);
        scheduler
            .generate(
                &RunRequest::new(monday())
                    .until(monday() + Duration::days(20))
                    .with_stop_at_first_exhausted_show(false),
            )
            .unwrap();

        let from = monday() + Duration::days(rng.random_range(0..20));
        scheduler.clear_range(from, None).unwrap();
        assert!(scheduler.all_shows().all(Show::is_sorted));

        scheduler.clear_range(monday(), None).unwrap();
        for show in &catalog {
            let restored = scheduler.show(&show.id).unwrap();
            assert!(restored.episodes().eq(show.episodes()), "seed {seed}: {}", show.id);
        }
    }
}

#[test]
fn test_priority_breaks_ties_across_three_levels() {
    let mut scheduler = Scheduler::default();
    for (name, priority) in [("Low", 3), ("High", 1), ("Mid", 2)] {
        scheduler
            .register_show(Show::new(name).with_priority(priority).with_episodes(1, 3, None))
            .unwrap();
    }
    scheduler
        .generate(&RunRequest::new(monday()).until(monday() + Duration::days(2)))
        .unwrap();

    let order: Vec<String> = scheduler
        .calendar()
        .iter()
        .flat_map(|day| day.episodes().map(|ep| ep.show.to_string()))
        .collect();
    assert_eq!(order, vec!["High", "Mid", "Low"]);
}
