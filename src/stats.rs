use crate::models::{
    DayView, DoseKey, MonthlyCounts, SlotView, StatsResponse, Streaks, TrackerData, WeekResponse,
    SLOT_COUNT, SLOT_NAMES,
};
use chrono::{Datelike, Duration, Local, NaiveDate};

pub fn build_stats(data: &TrackerData) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), data)
}

pub fn build_stats_at(today: NaiveDate, data: &TrackerData) -> StatsResponse {
    StatsResponse {
        month: month_to_date(today, data),
        streaks: streaks_at(today, data),
    }
}

/// A day is complete when every active slot has a taken record. A day with
/// zero active slots is never complete.
pub fn day_complete(date: NaiveDate, data: &TrackerData) -> bool {
    if data.dose_pattern.active_count() == 0 {
        return false;
    }
    data.dose_pattern
        .active_slots()
        .all(|slot| data.records.contains(&DoseKey::new(date, slot)))
}

pub fn month_to_date(today: NaiveDate, data: &TrackerData) -> MonthlyCounts {
    let mut taken = 0u32;
    let mut total = 0u32;

    for day_of_month in 1..=today.day() {
        let Some(date) = today.with_day(day_of_month) else {
            continue;
        };
        for slot in data.dose_pattern.active_slots() {
            total += 1;
            if data.records.contains(&DoseKey::new(date, slot)) {
                taken += 1;
            }
        }
    }

    let open = total - taken;
    let rate_percent = if total == 0 {
        0
    } else {
        ((f64::from(taken) / f64::from(total)) * 100.0).round() as u32
    };

    MonthlyCounts {
        taken,
        open,
        rate_percent,
    }
}

pub fn streaks_at(today: NaiveDate, data: &TrackerData) -> Streaks {
    let (Some(first), Some(last)) = (data.records.first(), data.records.last()) else {
        return Streaks {
            current: 0,
            best: 0,
        };
    };

    // best: forward scan from the earliest record, never past today
    let end = last.date.min(today);
    let mut best = 0u32;
    let mut running = 0u32;
    let mut day = first.date;
    while day <= end {
        if day_complete(day, data) {
            running += 1;
            best = best.max(running);
        } else {
            running = 0;
        }
        day = day + Duration::days(1);
    }

    // current: consecutive complete days ending today; 0 if today incomplete
    let mut current = 0u32;
    let mut day = today;
    while day_complete(day, data) {
        current += 1;
        day = day - Duration::days(1);
    }

    Streaks { current, best }
}

pub fn build_week(data: &TrackerData, start: Option<NaiveDate>) -> WeekResponse {
    build_week_at(Local::now().date_naive(), data, start)
}

pub fn build_week_at(today: NaiveDate, data: &TrackerData, start: Option<NaiveDate>) -> WeekResponse {
    let monday = week_start(start.unwrap_or(today));
    let mut days = Vec::with_capacity(7);
    for offset in 0..7 {
        days.push(day_view(monday + Duration::days(offset), today, data));
    }

    WeekResponse {
        week: week_label(monday),
        start_date: monday.to_string(),
        end_date: (monday + Duration::days(6)).to_string(),
        days,
        can_undo: data.can_undo(),
    }
}

pub fn day_view(date: NaiveDate, today: NaiveDate, data: &TrackerData) -> DayView {
    let slots = (0..SLOT_COUNT as u8)
        .map(|slot| SlotView {
            slot,
            name: SLOT_NAMES[usize::from(slot)].to_string(),
            active: data.dose_pattern.is_active(slot),
            taken: data.records.contains(&DoseKey::new(date, slot)),
        })
        .collect();

    DayView {
        date: date.to_string(),
        weekday: date.format("%a").to_string(),
        is_today: date == today,
        is_future: date > today,
        complete: day_complete(date, data),
        slots,
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
