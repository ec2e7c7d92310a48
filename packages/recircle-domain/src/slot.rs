use time::{Date, Time};

/// Scheduling policy snapshot, taken from config at call time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotPolicy {
	pub daily_capacity: u32,
	pub first_slot_hour: u8,
	pub cutoff_hour: u8,
	pub max_lookahead_days: u32,
}

/// A (date, time) pair eligible to host exactly one pickup, plus the
/// 1-based position within that day's queue.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Slot {
	pub date: Date,
	pub time: Time,
	pub position_in_queue: u32,
}

pub fn before_cutoff(policy: &SlotPolicy, now: Time) -> bool {
	now.hour() < policy.cutoff_hour
}

/// First candidate date for the slot search: today while the cutoff has not
/// passed, otherwise tomorrow.
pub fn search_start(policy: &SlotPolicy, today: Date, now: Time) -> Option<Date> {
	if before_cutoff(policy, now) { Some(today) } else { today.next_day() }
}

/// Places a pickup into `candidate` given `booked` existing bookings for
/// that district and day, or returns `None` when the day is full.
///
/// Same-day slots that have already passed are pushed forward to the next
/// full hour, preserving the current minute. Hour arithmetic stays within
/// the day because config validation bounds `first_slot_hour +
/// daily_capacity`; an invalid policy yields no slot on any day and
/// surfaces as lookahead exhaustion at the call site.
pub fn place_in_day(
	policy: &SlotPolicy,
	candidate: Date,
	today: Date,
	now: Time,
	booked: u32,
) -> Option<Slot> {
	if booked >= policy.daily_capacity {
		return None;
	}

	let hour = policy.first_slot_hour + booked as u8;
	let mut slot = Time::from_hms(hour, 0, 0).ok()?;

	if candidate == today && before_cutoff(policy, now) && slot <= now {
		slot = Time::from_hms(now.hour() + 1, now.minute(), 0).ok()?;
	}

	Some(Slot { date: candidate, time: slot, position_in_queue: booked + 1 })
}

pub fn format_date(date: Date) -> String {
	format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// The hour is intentionally not zero-padded ("9:00", never "09:00");
/// existing consumers compare these strings byte for byte.
pub fn format_time(time: Time) -> String {
	format!("{}:{:02}", time.hour(), time.minute())
}
