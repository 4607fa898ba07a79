//! Per-date visit generation
//!
//! A [`Day`] binds one date to its resolved visitor count and weekend flags.
//! The [`DayGenerator`] turns a day into visits by layering overrides on top
//! of a baseline draw, in this order:
//!
//! 1. split the count into disjoint overall, lunch and dinner buckets
//! 2. overall visits arrive across operating hours with a triangular dwell
//! 3. lunch visits arrive in the lunch rush with its dwell
//! 4. dinner visits arrive in the dinner rush with its dwell
//! 5. on weekends every dwell is replaced by the sunny or ordinary weekend dwell
//! 6. on the senior day, visits outside the senior window may be moved into it
//! 7. every visit gets an independent senior flag
//!
//! Later steps override earlier ones. Generation cannot fail: every input was
//! validated when the [`StoreConfig`] was built.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::Rng;
use tracing::{debug, instrument};

use crate::events::Visit;
use crate::store::TrafficResolver;
use crate::types::{HolidayProximity, StoreConfig, VisitBucket};

/// One date's working context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Day {
    /// The date
    pub date: NaiveDate,
    /// Weekday of `date`
    pub weekday: Weekday,
    /// Saturday or Sunday
    pub is_weekend: bool,
    /// Weekend day drawn as sunny
    pub is_sunny: bool,
    /// Holiday classification of `date`
    pub proximity: HolidayProximity,
    /// Number of visits to generate
    pub visitor_count: u32,
}

impl Day {
    /// Resolve traffic and draw the weather for `date`
    pub fn prepare<R: Rng + ?Sized>(
        date: NaiveDate,
        config: &StoreConfig,
        resolver: &TrafficResolver,
        rng: &mut R,
    ) -> Self {
        let resolved = resolver.resolve_detailed(date, config);
        let outlook = config.sunny().evaluate(date, rng);
        let visitor_count = config.sunny().adjust_count(resolved.count, outlook);

        Self {
            date,
            weekday: date.weekday(),
            is_weekend: outlook.is_weekend,
            is_sunny: outlook.is_sunny,
            proximity: resolved.proximity,
            visitor_count,
        }
    }
}

/// Visitor count split into disjoint arrival buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketSplit {
    /// Visits drawn across operating hours
    pub overall: u32,
    /// Visits drawn in the lunch rush
    pub lunch: u32,
    /// Visits drawn in the dinner rush
    pub dinner: u32,
}

impl BucketSplit {
    /// Sum of all buckets
    pub fn total(&self) -> u32 {
        self.overall + self.lunch + self.dinner
    }
}

/// Generates the visits of one day
#[derive(Debug, Clone, Copy)]
pub struct DayGenerator<'a> {
    config: &'a StoreConfig,
}

impl<'a> DayGenerator<'a> {
    /// Create a generator for `config`
    pub fn new(config: &'a StoreConfig) -> Self {
        Self { config }
    }

    /// Split `total` into overall, lunch and dinner buckets
    ///
    /// Lunch and dinner are each rounded from `total`; dinner is capped so the
    /// buckets never exceed `total`.
    pub fn split(&self, total: u32) -> BucketSplit {
        let (lunch, _) = self.config.lunch().split(total);
        let (dinner, _) = self.config.dinner().split(total);
        let dinner = dinner.min(total - lunch);

        BucketSplit {
            overall: total - lunch - dinner,
            lunch,
            dinner,
        }
    }

    /// Generate every visit of `day`, unsorted
    #[instrument(
        skip(self, day, rng),
        fields(date = %day.date, visitor_count = day.visitor_count)
    )]
    pub fn generate_day<R: Rng + ?Sized>(&self, day: &Day, rng: &mut R) -> Vec<Visit> {
        let split = self.split(day.visitor_count);
        let senior_day = self.config.senior().applies_on(day.weekday);

        let mut visits = Vec::with_capacity(split.total() as usize);
        for (bucket, count) in [
            (VisitBucket::Overall, split.overall),
            (VisitBucket::Lunch, split.lunch),
            (VisitBucket::Dinner, split.dinner),
        ] {
            for _ in 0..count {
                visits.push(self.generate_visit(day, bucket, senior_day, rng));
            }
        }

        debug!(
            overall = split.overall,
            lunch = split.lunch,
            dinner = split.dinner,
            senior_day = senior_day,
            is_sunny = day.is_sunny,
            "Generated {} visits",
            visits.len()
        );

        visits
    }

    fn generate_visit<R: Rng + ?Sized>(
        &self,
        day: &Day,
        bucket: VisitBucket,
        senior_day: bool,
        rng: &mut R,
    ) -> Visit {
        let config = self.config;

        let (mut time_in, mut time_spent) = match bucket {
            VisitBucket::Overall => (
                config.operating_hours().sample_arrival(day.date, rng),
                config.dwell().sample(rng),
            ),
            VisitBucket::Lunch => (
                config.lunch().sample_arrival(day.date, rng),
                config.lunch().sample_dwell(rng),
            ),
            VisitBucket::Dinner => (
                config.dinner().sample_arrival(day.date, rng),
                config.dinner().sample_dwell(rng),
            ),
        };

        if day.is_weekend {
            time_spent = config.sunny().sample_weekend_dwell(day.is_sunny, rng);
        }

        let senior = config.senior();
        let mut senior_window = false;
        if senior_day && !senior.contains(time_in.time()) && rng.gen_bool(senior.percent()) {
            time_in = senior.sample_arrival(day.date, rng);
            time_spent = senior.sample_dwell(rng);
            senior_window = true;
        }

        // Independent of the senior window above
        let is_senior = rng.gen_bool(config.percent_senior());

        Visit {
            date: day.date,
            day_of_week: day.weekday,
            time_in,
            time_spent,
            is_senior,
            is_sunny: day.is_sunny,
            bucket,
            senior_window,
        }
    }
}
