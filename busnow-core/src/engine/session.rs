//! One schedule lookup session.
//!
//! A session owns the query parameters, the fetched entries, and the
//! derived next-bus state for a single station pair. It is driven from the
//! outside: the UI shell feeds it direction/day-type selections, refresh
//! requests, and a once-a-second clock tick. All mutation happens through
//! `&mut self` on one owner, so there is no locking.
//!
//! Fetches are sequenced with a generation token. Every
//! [`ScheduleSession::begin_fetch`] invalidates the tickets of all earlier
//! fetches; a completion arriving with a stale ticket is dropped instead of
//! overwriting the state a newer fetch produced.

use chrono::NaiveDate;
use tracing::debug;

use crate::backend::{BackendError, ScheduleService};
use crate::domain::{BusTime, DayType, Direction, ScheduleEntry, StationPair};
use crate::normalize::VariantTable;

use super::dates::target_date;
use super::next_bus::{minutes_until_next, next_bus_index};

/// Token identifying one fetch. Completions are applied only while their
/// ticket is still the latest.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    /// Search-normalized departure station.
    pub departure: String,
    /// Search-normalized arrival station.
    pub arrival: String,
    /// Target calendar date for the query.
    pub date: NaiveDate,
}

/// State machine for one schedule lookup.
///
/// Lifecycle: construct with a service handle and the submitted pair, call
/// [`refresh`] to load, feed [`tick`] from a clock. Direction and day-type
/// selection re-enter the loading state and re-fetch.
///
/// [`refresh`]: ScheduleSession::refresh
/// [`tick`]: ScheduleSession::tick
pub struct ScheduleSession<S> {
    service: S,
    table: VariantTable,

    /// The pair as submitted. Direction swaps always derive from this,
    /// never from the previously displayed pair, so selecting inbound
    /// twice does not re-reverse.
    original: StationPair,
    direction: Direction,
    day_type: DayType,
    today: NaiveDate,
    target: NaiveDate,

    entries: Vec<ScheduleEntry>,
    loading: bool,
    error: Option<BackendError>,
    next_index: Option<usize>,
    last_tick: Option<BusTime>,
    generation: u64,
}

impl<S: ScheduleService> ScheduleSession<S> {
    /// Create a session for a submitted pair.
    ///
    /// The initial day type is whichever timetable `today` falls under, so
    /// the initial target date is today itself. No fetch is issued until
    /// [`ScheduleSession::refresh`] is called.
    pub fn new(service: S, pair: StationPair, today: NaiveDate) -> Self {
        Self {
            service,
            table: VariantTable::default(),
            original: pair,
            direction: Direction::Outbound,
            day_type: DayType::of(today),
            today,
            target: today,
            entries: Vec::new(),
            loading: false,
            error: None,
            next_index: None,
            last_tick: None,
            generation: 0,
        }
    }

    /// The pair the current direction queries: the original for outbound,
    /// the swapped pair for inbound.
    pub fn active_pair(&self) -> StationPair {
        match self.direction {
            Direction::Outbound => self.original.clone(),
            Direction::Inbound => self.original.swapped(),
        }
    }

    /// Select the query direction and re-fetch.
    ///
    /// Idempotent and order-independent: the active pair is recomputed
    /// from the stored original, so repeated selections settle on the same
    /// orientation.
    pub async fn select_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.refresh().await;
    }

    /// Select the timetable day type and re-fetch.
    ///
    /// Recomputes the target date from `today`: today itself when it
    /// already matches, otherwise the next matching calendar date.
    pub async fn select_day_type(&mut self, day_type: DayType, today: NaiveDate) {
        self.day_type = day_type;
        self.today = today;
        self.target = target_date(today, day_type);
        self.refresh().await;
    }

    /// Re-issue the fetch with the current direction and target date.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let result = self
            .service
            .fetch_schedules(&ticket.departure, &ticket.arrival, ticket.date)
            .await;
        self.apply_fetch_outcome(&ticket, result);
    }

    /// Start a fetch: bump the generation, enter the loading state, clear
    /// any prior error, and hand back the ticket with search-normalized
    /// parameters.
    ///
    /// Split from [`ScheduleSession::apply_fetch_outcome`] so callers that
    /// run the service call elsewhere still get stale-completion
    /// protection.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;

        let pair = self.active_pair();
        FetchTicket {
            generation: self.generation,
            departure: self.table.normalize_for_search(&pair.departure),
            arrival: self.table.normalize_for_search(&pair.arrival),
            date: self.target,
        }
    }

    /// Apply a fetch completion. Returns false (and changes nothing) when
    /// the ticket is stale, i.e. a newer fetch has begun since.
    ///
    /// An `EmptyResponse` outcome is a valid empty timetable, not an
    /// error. Every other error clears the entries and is surfaced.
    pub fn apply_fetch_outcome(
        &mut self,
        ticket: &FetchTicket,
        result: Result<Vec<ScheduleEntry>, BackendError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale fetch completion"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(entries) => {
                self.entries = entries;
                self.error = None;
            }
            Err(BackendError::EmptyResponse) => {
                self.entries.clear();
                self.error = None;
            }
            Err(e) => {
                self.entries.clear();
                self.error = Some(e);
            }
        }

        self.next_index = self
            .last_tick
            .and_then(|now| next_bus_index(&self.entries, now));
        true
    }

    /// Advance the clock and recompute the next-bus pointer.
    ///
    /// Returns the new pointer only when it changed, so downstream
    /// consumers are not re-notified every second.
    pub fn tick(&mut self, now: BusTime) -> Option<Option<usize>> {
        self.last_tick = Some(now);
        let index = next_bus_index(&self.entries, now);
        if index != self.next_index {
            self.next_index = index;
            Some(index)
        } else {
            None
        }
    }

    /// Minutes until the next departure as of the last tick.
    pub fn minutes_until_next(&self) -> Option<u32> {
        let now = self.last_tick?;
        minutes_until_next(&self.entries, now)
    }

    /// The fetched entries in timetable order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    /// Whether a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The terminal error of the last fetch, if any.
    pub fn error(&self) -> Option<&BackendError> {
        self.error.as_ref()
    }

    /// Index of the next not-yet-departed entry, as of the last tick.
    pub fn next_bus_index(&self) -> Option<usize> {
        self.next_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn day_type(&self) -> DayType {
        self.day_type
    }

    /// The calendar date the current query targets.
    pub fn target_date(&self) -> NaiveDate {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockScheduleService;

    fn entry(time: &str) -> ScheduleEntry {
        ScheduleEntry::new(
            BusTime::parse(time).unwrap(),
            "幹名駅1",
            "名古屋駅",
            "3",
            "weekday",
            Vec::new(),
        )
    }

    fn at(time: &str) -> BusTime {
        BusTime::parse(time).unwrap()
    }

    /// 2025-06-04, a Wednesday.
    fn wednesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 4).unwrap()
    }

    fn session_with(
        entries: Vec<ScheduleEntry>,
    ) -> (ScheduleSession<MockScheduleService>, MockScheduleService) {
        let mock = MockScheduleService::new().with_entries("高辻\u{E0100}", "名古屋駅", entries);
        let session = ScheduleSession::new(
            mock.clone(),
            StationPair::new("高辻", "名古屋駅"),
            wednesday(),
        );
        (session, mock)
    }

    #[tokio::test]
    async fn refresh_loads_entries() {
        let (mut session, _mock) = session_with(vec![entry("08:00"), entry("08:30")]);

        session.refresh().await;

        assert!(!session.is_loading());
        assert!(session.error().is_none());
        assert_eq!(session.entries().len(), 2);
    }

    #[tokio::test]
    async fn search_keys_are_normalized() {
        let (mut session, mock) = session_with(vec![entry("08:00")]);

        session.refresh().await;

        // The user typed the bare 辻; the request carries the marked form.
        let requests = mock.requests();
        assert_eq!(requests[0].departure, "高辻\u{E0100}");
        assert_eq!(requests[0].arrival, "名古屋駅");
        assert_eq!(requests[0].date, wednesday());
    }

    #[tokio::test]
    async fn empty_response_is_not_an_error() {
        let mock = MockScheduleService::new();
        let mut session = ScheduleSession::new(
            mock,
            StationPair::new("どこか", "べつのどこか"),
            wednesday(),
        );

        session.refresh().await;

        assert!(!session.is_loading());
        assert!(session.error().is_none());
        assert!(session.entries().is_empty());
    }

    #[tokio::test]
    async fn terminal_error_is_surfaced() {
        let (mut session, mock) = session_with(vec![entry("08:00")]);
        session.refresh().await;
        assert_eq!(session.entries().len(), 1);

        mock.fail_with(BackendError::ConnectionFailed);
        session.refresh().await;

        assert_eq!(session.error(), Some(&BackendError::ConnectionFailed));
        assert!(session.entries().is_empty());

        // Retry affordance: a later refresh clears the error.
        mock.clear_failure();
        session.refresh().await;
        assert!(session.error().is_none());
        assert_eq!(session.entries().len(), 1);
    }

    #[tokio::test]
    async fn inbound_swaps_once_regardless_of_repetition() {
        let (mut session, mock) = session_with(Vec::new());

        session.select_direction(Direction::Inbound).await;
        session.select_direction(Direction::Inbound).await;

        let requests = mock.requests();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            assert_eq!(request.departure, "名古屋駅");
            assert_eq!(request.arrival, "高辻\u{E0100}");
        }

        session.select_direction(Direction::Outbound).await;
        let requests = mock.requests();
        assert_eq!(requests[2].departure, "高辻\u{E0100}");
    }

    #[tokio::test]
    async fn day_type_selection_retargets_the_date() {
        let (mut session, mock) = session_with(Vec::new());
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();

        session.select_day_type(DayType::Holiday, wednesday()).await;
        assert_eq!(session.target_date(), saturday);

        session.select_day_type(DayType::Weekday, wednesday()).await;
        assert_eq!(session.target_date(), wednesday());

        let requests = mock.requests();
        assert_eq!(requests[0].date, saturday);
        assert_eq!(requests[1].date, wednesday());
    }

    #[tokio::test]
    async fn tick_tracks_next_bus_and_deduplicates() {
        let (mut session, _mock) =
            session_with(vec![entry("08:00"), entry("08:30"), entry("09:00")]);
        session.refresh().await;

        assert_eq!(session.tick(at("08:15")), Some(Some(1)));
        assert_eq!(session.minutes_until_next(), Some(15));

        // Same minute: no change, no re-emission.
        assert_eq!(session.tick(at("08:15")), None);
        assert_eq!(session.tick(at("08:29")), None);

        // The 08:30 departs on the exact minute.
        assert_eq!(session.tick(at("08:30")), Some(Some(2)));
        assert_eq!(session.minutes_until_next(), Some(30));

        // All departed.
        assert_eq!(session.tick(at("09:00")), Some(None));
        assert_eq!(session.minutes_until_next(), None);
        assert_eq!(session.tick(at("09:01")), None);
    }

    #[tokio::test]
    async fn fetch_completion_recomputes_pointer_from_last_tick() {
        let (mut session, _mock) = session_with(vec![entry("08:00"), entry("08:30")]);

        assert_eq!(session.tick(at("08:10")), None);
        session.refresh().await;

        assert_eq!(session.next_bus_index(), Some(1));
        // The following tick at the same minute is not a change.
        assert_eq!(session.tick(at("08:10")), None);
    }

    #[tokio::test]
    async fn stale_completion_is_dropped() {
        let (mut session, _mock) = session_with(vec![entry("08:00")]);

        let stale = session.begin_fetch();
        let fresh = session.begin_fetch();

        let applied = session.apply_fetch_outcome(&fresh, Ok(vec![entry("09:00")]));
        assert!(applied);
        assert!(!session.is_loading());

        // The slow first fetch completes afterwards; it must not clobber.
        let applied = session.apply_fetch_outcome(&stale, Ok(vec![entry("07:00")]));
        assert!(!applied);
        assert_eq!(session.entries().len(), 1);
        assert_eq!(
            session.entries()[0].departure_time,
            BusTime::parse("09:00").unwrap()
        );
    }

    #[tokio::test]
    async fn stale_error_does_not_clear_newer_entries() {
        let (mut session, _mock) = session_with(vec![entry("08:00")]);

        let stale = session.begin_fetch();
        session.refresh().await;
        assert_eq!(session.entries().len(), 1);

        let applied = session.apply_fetch_outcome(&stale, Err(BackendError::ConnectionFailed));
        assert!(!applied);
        assert!(session.error().is_none());
        assert_eq!(session.entries().len(), 1);
    }

    #[tokio::test]
    async fn begin_fetch_enters_loading_state() {
        let (mut session, _mock) = session_with(Vec::new());

        let ticket = session.begin_fetch();
        assert!(session.is_loading());
        assert!(session.error().is_none());

        session.apply_fetch_outcome(&ticket, Err(BackendError::EmptyResponse));
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn initial_day_type_follows_today() {
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        let session = ScheduleSession::new(
            MockScheduleService::new(),
            StationPair::new("A", "B"),
            saturday,
        );
        assert_eq!(session.day_type(), DayType::Holiday);
        assert_eq!(session.target_date(), saturday);

        let session = ScheduleSession::new(
            MockScheduleService::new(),
            StationPair::new("A", "B"),
            wednesday(),
        );
        assert_eq!(session.day_type(), DayType::Weekday);
        assert_eq!(session.direction(), Direction::Outbound);
    }
}
