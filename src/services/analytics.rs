//! Pure booking aggregation engine.
//!
//! Everything here is deterministic and side-effect free: functions take
//! slices of booking records and return owned summaries, so the same inputs
//! always produce the same dashboard numbers regardless of where the records
//! came from.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::Hash;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::booking::{Booking, BookingStatus, BookingWithDetails};

/// Whether cancelled bookings count toward a user's historical spend.
///
/// Spend answers "how much has this user committed", and a cancelled booking
/// is money that never changed hands, so it is excluded.
pub const INCLUDE_CANCELLED_IN_SPEND: bool = false;

/// The booking fields the aggregation functions need, so they can run over
/// bare rows or detail-joined rows alike.
pub trait BookingRecord {
    fn booking_user_id(&self) -> Uuid;
    fn booking_status(&self) -> BookingStatus;
    fn booking_total_price(&self) -> i64;
    fn booking_created_at(&self) -> DateTime<Utc>;
    fn booking_check_in(&self) -> NaiveDate;
}

impl BookingRecord for Booking {
    fn booking_user_id(&self) -> Uuid {
        self.user_id
    }
    fn booking_status(&self) -> BookingStatus {
        self.status
    }
    fn booking_total_price(&self) -> i64 {
        self.total_price
    }
    fn booking_created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn booking_check_in(&self) -> NaiveDate {
        self.check_in
    }
}

impl BookingRecord for BookingWithDetails {
    fn booking_user_id(&self) -> Uuid {
        self.user_id
    }
    fn booking_status(&self) -> BookingStatus {
        self.status
    }
    fn booking_total_price(&self) -> i64 {
        self.total_price
    }
    fn booking_created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    fn booking_check_in(&self) -> NaiveDate {
        self.check_in
    }
}

/// Counts and revenue broken down by booking status
#[derive(Debug, Serialize, Default, PartialEq, Eq)]
pub struct StatusSummary {
    pub confirmed: usize,
    pub cancelled: usize,
    /// Revenue from confirmed bookings only; cancelled money never lands
    pub confirmed_revenue: i64,
}

/// Summarize bookings by status in a single pass
pub fn summarize_by_status<R: BookingRecord>(records: &[R]) -> StatusSummary {
    let mut summary = StatusSummary::default();

    for record in records {
        match record.booking_status() {
            BookingStatus::Confirmed => {
                summary.confirmed += 1;
                summary.confirmed_revenue += record.booking_total_price();
            }
            BookingStatus::Cancelled => summary.cancelled += 1,
        }
    }

    summary
}

/// One month's worth of booking activity
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MonthlyBucket {
    /// Short month label with year, e.g. "Mar 2024"
    pub month: String,
    pub count: usize,
    pub total: i64,
}

/// Bucket bookings by creation month, oldest month first.
///
/// Months with no bookings do not appear; buckets are keyed on the actual
/// (year, month) pair so December sorts before the following January.
pub fn monthly_histogram<R: BookingRecord>(records: &[R]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<(i32, u32), (usize, i64)> = BTreeMap::new();

    for record in records {
        let created = record.booking_created_at();
        let entry = buckets.entry((created.year(), created.month())).or_default();
        entry.0 += 1;
        entry.1 += record.booking_total_price();
    }

    buckets
        .into_iter()
        .map(|((year, month), (count, total))| MonthlyBucket {
            month: format!(
                "{} {}",
                month_label(month),
                year
            ),
            count,
            total,
        })
        .collect()
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

/// Top-n keys by occurrence count, descending.
///
/// Ties keep first-seen order in the input, so the output is stable for a
/// given input ordering.
pub fn top_n<I, K>(keys: I, n: usize) -> Vec<(K, usize)>
where
    I: IntoIterator<Item = K>,
    K: Eq + Hash + Clone,
{
    let mut counts: HashMap<K, usize> = HashMap::new();
    let mut first_seen: Vec<K> = Vec::new();

    for key in keys {
        let entry = counts.entry(key.clone()).or_insert(0);
        if *entry == 0 {
            first_seen.push(key);
        }
        *entry += 1;
    }

    let mut ranked: Vec<(K, usize)> = first_seen
        .into_iter()
        .map(|key| {
            let count = counts[&key];
            (key, count)
        })
        .collect();

    // Stable sort preserves first-seen order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Per-user booking activity and spend
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UserBookingStats {
    pub user_id: Uuid,
    pub booking_count: usize,
    pub total_spend: i64,
}

/// Aggregate bookings per user under the default spend policy
pub fn join_user_booking_stats<R: BookingRecord>(records: &[R]) -> Vec<UserBookingStats> {
    join_user_booking_stats_with_policy(records, INCLUDE_CANCELLED_IN_SPEND)
}

/// Aggregate bookings per user.
///
/// Every booking counts toward `booking_count` regardless of status; whether
/// cancelled bookings count toward `total_spend` is controlled by
/// `include_cancelled_in_spend`. Users appear in first-seen order.
pub fn join_user_booking_stats_with_policy<R: BookingRecord>(
    records: &[R],
    include_cancelled_in_spend: bool,
) -> Vec<UserBookingStats> {
    let mut stats: Vec<UserBookingStats> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for record in records {
        let user_id = record.booking_user_id();
        let i = *index.entry(user_id).or_insert_with(|| {
            stats.push(UserBookingStats {
                user_id,
                booking_count: 0,
                total_spend: 0,
            });
            stats.len() - 1
        });

        stats[i].booking_count += 1;
        let counts_toward_spend = include_cancelled_in_spend
            || record.booking_status() == BookingStatus::Confirmed;
        if counts_toward_spend {
            stats[i].total_spend += record.booking_total_price();
        }
    }

    stats
}

/// A user's bookings partitioned by timeframe
#[derive(Debug, Serialize, Default, PartialEq, Eq)]
pub struct TripCounts {
    pub upcoming: usize,
    pub past: usize,
    pub cancelled: usize,
}

/// Partition bookings into upcoming, past and cancelled.
///
/// Cancelled wins over timeframe: a cancelled booking is never upcoming or
/// past. A confirmed booking checking in today is upcoming. Every booking
/// lands in exactly one bucket.
pub fn count_trips<R: BookingRecord>(records: &[R], today: NaiveDate) -> TripCounts {
    let mut counts = TripCounts::default();

    for record in records {
        if record.booking_status() == BookingStatus::Cancelled {
            counts.cancelled += 1;
        } else if record.booking_check_in() >= today {
            counts.upcoming += 1;
        } else {
            counts.past += 1;
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::CancelActor;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(
        user_id: Uuid,
        status: BookingStatus,
        total_price: i64,
        created: (i32, u32, u32),
        check_in: NaiveDate,
    ) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            user_id,
            hotel_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            check_in,
            check_out: check_in + chrono::Duration::days(2),
            total_price,
            status,
            created_at: Utc
                .with_ymd_and_hms(created.0, created.1, created.2, 12, 0, 0)
                .unwrap(),
            cancelled_at: None,
            cancelled_by: if status == BookingStatus::Cancelled {
                Some(CancelActor::User)
            } else {
                None
            },
        }
    }

    #[test]
    fn test_summarize_excludes_cancelled_revenue() {
        let user = Uuid::new_v4();
        let records = vec![
            booking(user, BookingStatus::Confirmed, 6000, (2024, 3, 1), date(2024, 3, 10)),
            booking(user, BookingStatus::Confirmed, 1500, (2024, 3, 2), date(2024, 3, 20)),
            booking(user, BookingStatus::Cancelled, 9000, (2024, 3, 3), date(2024, 4, 1)),
        ];

        let summary = summarize_by_status(&records);
        assert_eq!(summary.confirmed, 2);
        assert_eq!(summary.cancelled, 1);
        assert_eq!(summary.confirmed_revenue, 7500);
    }

    #[test]
    fn test_summarize_empty() {
        let records: Vec<Booking> = vec![];
        assert_eq!(summarize_by_status(&records), StatusSummary::default());
    }

    #[test]
    fn test_histogram_chronological_across_year_boundary() {
        let user = Uuid::new_v4();
        let records = vec![
            booking(user, BookingStatus::Confirmed, 100, (2024, 1, 5), date(2024, 2, 1)),
            booking(user, BookingStatus::Confirmed, 200, (2023, 12, 20), date(2024, 1, 1)),
            booking(user, BookingStatus::Confirmed, 300, (2024, 1, 10), date(2024, 2, 1)),
        ];

        let buckets = monthly_histogram(&records);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].month, "Dec 2023");
        assert_eq!(buckets[0].count, 1);
        assert_eq!(buckets[0].total, 200);
        assert_eq!(buckets[1].month, "Jan 2024");
        assert_eq!(buckets[1].count, 2);
        assert_eq!(buckets[1].total, 400);
    }

    #[test]
    fn test_histogram_includes_cancelled_bookings() {
        let user = Uuid::new_v4();
        let records = vec![
            booking(user, BookingStatus::Cancelled, 500, (2024, 3, 1), date(2024, 3, 10)),
        ];

        let buckets = monthly_histogram(&records);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 1);
    }

    #[test]
    fn test_top_n_ranks_descending_and_truncates() {
        let keys = vec!["a", "b", "a", "c", "b", "a", "d"];
        let ranked = top_n(keys, 2);
        assert_eq!(ranked, vec![("a", 3), ("b", 2)]);
    }

    #[test]
    fn test_top_n_ties_keep_first_seen_order() {
        let keys = vec!["x", "y", "y", "x", "z"];
        let ranked = top_n(keys, 3);
        assert_eq!(ranked, vec![("x", 2), ("y", 2), ("z", 1)]);
    }

    #[test]
    fn test_top_n_smaller_than_n() {
        let ranked = top_n(vec!["only"], 5);
        assert_eq!(ranked, vec![("only", 1)]);
    }

    #[test]
    fn test_user_stats_spend_excludes_cancelled_by_default() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let records = vec![
            booking(alice, BookingStatus::Confirmed, 6000, (2024, 3, 1), date(2024, 3, 10)),
            booking(alice, BookingStatus::Cancelled, 2000, (2024, 3, 2), date(2024, 3, 20)),
            booking(bob, BookingStatus::Confirmed, 1500, (2024, 3, 3), date(2024, 4, 1)),
        ];

        let stats = join_user_booking_stats(&records);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].user_id, alice);
        assert_eq!(stats[0].booking_count, 2);
        assert_eq!(stats[0].total_spend, 6000);
        assert_eq!(stats[1].user_id, bob);
        assert_eq!(stats[1].total_spend, 1500);
    }

    #[test]
    fn test_user_stats_spend_policy_can_include_cancelled() {
        let alice = Uuid::new_v4();
        let records = vec![
            booking(alice, BookingStatus::Confirmed, 6000, (2024, 3, 1), date(2024, 3, 10)),
            booking(alice, BookingStatus::Cancelled, 2000, (2024, 3, 2), date(2024, 3, 20)),
        ];

        let stats = join_user_booking_stats_with_policy(&records, true);
        assert_eq!(stats[0].total_spend, 8000);
        assert_eq!(stats[0].booking_count, 2);
    }

    #[test]
    fn test_count_trips_partition_is_exhaustive() {
        let user = Uuid::new_v4();
        let today = date(2024, 3, 15);
        let records = vec![
            booking(user, BookingStatus::Confirmed, 100, (2024, 3, 1), date(2024, 3, 20)),
            booking(user, BookingStatus::Confirmed, 100, (2024, 3, 1), date(2024, 3, 15)),
            booking(user, BookingStatus::Confirmed, 100, (2024, 2, 1), date(2024, 3, 1)),
            booking(user, BookingStatus::Cancelled, 100, (2024, 3, 1), date(2024, 3, 20)),
        ];

        let counts = count_trips(&records, today);
        // Check-in today counts as upcoming
        assert_eq!(counts.upcoming, 2);
        assert_eq!(counts.past, 1);
        assert_eq!(counts.cancelled, 1);
        assert_eq!(
            counts.upcoming + counts.past + counts.cancelled,
            records.len()
        );
    }

    #[test]
    fn test_count_trips_cancelled_wins_over_timeframe() {
        let user = Uuid::new_v4();
        let today = date(2024, 3, 15);
        let records = vec![
            // Cancelled booking in the past still lands in cancelled
            booking(user, BookingStatus::Cancelled, 100, (2024, 1, 1), date(2024, 2, 1)),
        ];

        let counts = count_trips(&records, today);
        assert_eq!(counts.cancelled, 1);
        assert_eq!(counts.past, 0);
    }
}
