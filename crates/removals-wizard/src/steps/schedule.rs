use chrono::{Local, NaiveDate};
use removals_core::{
    BookingStore, BookingUpdate, SelectedDate, SelectedDatePatch, TimeValue, Van, VanType,
};

use super::{StepController, WizardStep};
use crate::error::ValidationErrors;

/// Move date, time window, crew size and van.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleStep {
    pub date: String,
    pub pickup_time: TimeValue,
    pub drop_time: Option<TimeValue>,
    pub number_of_movers: u32,
    pub van_type: Option<VanType>,
}

impl ScheduleStep {
    fn move_date(&self) -> Option<NaiveDate> {
        SelectedDate {
            date: Some(self.date.clone()),
            ..SelectedDate::default()
        }
        .move_date()
    }

    fn check(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match self.move_date() {
            None => errors.push("date", "enter a valid move date"),
            Some(date) if date < today => errors.push("date", "move date is in the past"),
            Some(_) => {}
        }
        let pickup = self
            .pickup_time
            .as_hours()
            .filter(|h| (0.0..24.0).contains(h));
        if pickup.is_none() {
            errors.push("pickupTime", "enter a valid pickup time");
        }
        if let Some(drop) = &self.drop_time {
            match (pickup, drop.as_hours()) {
                (_, None) => errors.push("dropTime", "enter a valid drop-off time"),
                (Some(p), Some(d)) if d <= p => {
                    errors.push("dropTime", "drop-off must be after pickup");
                }
                _ => {}
            }
        }
        if self.number_of_movers < 1 {
            errors.push("numberOfMovers", "select at least one mover");
        }
        if self.van_type.is_none() {
            errors.push("van", "select a van");
        }
        errors.into_result()
    }
}

fn is_clock_time(time: &TimeValue) -> bool {
    time.as_hours().is_some()
}

impl StepController for ScheduleStep {
    const STEP: WizardStep = WizardStep::Schedule;

    fn validate(&self, _store: &BookingStore) -> Result<(), ValidationErrors> {
        self.check(Local::now().date_naive())
    }

    fn into_updates(self, _store: &BookingStore) -> Vec<BookingUpdate> {
        let mut updates = vec![BookingUpdate::SelectedDate(SelectedDatePatch {
            date: Some(self.date),
            pickup_time: Some(self.pickup_time).filter(is_clock_time),
            drop_time: self.drop_time.filter(is_clock_time),
            number_of_movers: Some(self.number_of_movers),
            price: None,
        })];
        if let Some(van_type) = self.van_type {
            updates.push(BookingUpdate::Van(Van::new(van_type)));
        }
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step() -> ScheduleStep {
        ScheduleStep {
            date: "2030-06-01".to_owned(),
            pickup_time: TimeValue::Hours(8.5),
            drop_time: Some(TimeValue::Formatted("12:00:00".to_owned())),
            number_of_movers: 2,
            van_type: Some(VanType::Medium),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2030, 1, 1).expect("valid date")
    }

    #[test]
    fn valid_schedule_passes() {
        assert!(step().check(today()).is_ok());
    }

    #[test]
    fn past_date_and_missing_van_are_reported() {
        let mut s = step();
        s.date = "01/01/2020".to_owned();
        s.van_type = None;
        s.number_of_movers = 0;
        let errors = s.check(today()).unwrap_err();
        assert!(errors.has("date"));
        assert!(errors.has("van"));
        assert!(errors.has("numberOfMovers"));
    }

    #[test]
    fn drop_before_pickup_is_reported() {
        let mut s = step();
        s.drop_time = Some(TimeValue::Hours(7.0));
        assert!(s.check(today()).unwrap_err().has("dropTime"));
    }

    #[test]
    fn unparseable_date_is_reported() {
        let mut s = step();
        s.date = "next tuesday".to_owned();
        assert!(s.check(today()).unwrap_err().has("date"));
    }

    #[test]
    fn updates_keep_times_as_entered() {
        let mut store = BookingStore::new();
        for update in step().into_updates(&BookingStore::new()) {
            store.apply(update);
        }
        let selected = store.selected_date();
        assert_eq!(selected.pickup_time, Some(TimeValue::Hours(8.5)));
        assert_eq!(
            selected.drop_time,
            Some(TimeValue::Formatted("12:00:00".to_owned()))
        );
        assert_eq!(selected.number_of_movers, Some(2));
        assert_eq!(store.van().map(|v| v.van_type.clone()), Some(VanType::Medium));
    }
}
