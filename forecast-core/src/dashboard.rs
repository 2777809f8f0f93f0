//! Dashboard session state and its event handlers.
//!
//! All mutable state lives in [`DashboardState`]; callers own it and pass it
//! by `&mut` into each handler. Fetches are tagged with a [`RequestTicket`] and
//! a completion is only applied if no newer request has been issued since.

use tracing::{debug, info, warn};

use crate::{
    condition::{BackgroundAsset, IconAsset, classify},
    error::FetchError,
    model::{Forecast, ForecastQuery, UnitPreference},
    view::DashboardView,
};

/// The one message a user sees for any failed fetch.
pub const FETCH_FAILED_NOTICE: &str = "This place does not exist";

/// Issued for every fetch; hand it back with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    query: ForecastQuery,
}

impl RequestTicket {
    pub fn query(&self) -> &ForecastQuery {
        &self.query
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The forecast replaced whatever was shown.
    Applied,
    /// Nothing changed; show the notice once.
    Failed { notice: &'static str },
    /// A newer request was issued meanwhile; the result was dropped.
    Stale,
}

#[derive(Debug, Clone)]
pub struct DashboardState {
    input: String,
    place: String,
    unit: UnitPreference,
    forecast: Option<Forecast>,
    background: BackgroundAsset,
    primary_icon: IconAsset,
    issued: u64,
    /// The latest issued request has not completed yet.
    pending: bool,
}

impl DashboardState {
    pub fn new(place: impl Into<String>, unit: UnitPreference) -> Self {
        Self {
            input: String::new(),
            place: place.into(),
            unit,
            forecast: None,
            background: BackgroundAsset::Clear,
            primary_icon: IconAsset::Sun,
            issued: 0,
            pending: false,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Last place requested, loaded or not.
    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn unit(&self) -> UnitPreference {
        self.unit
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn background(&self) -> BackgroundAsset {
        self.background
    }

    pub fn primary_icon(&self) -> IconAsset {
        self.primary_icon
    }

    /// True while the most recent request is in flight. Superseded requests
    /// do not count.
    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Submit the typed text as the new place. The input is cleared either
    /// way; blank input issues no request.
    pub fn submit(&mut self) -> Option<RequestTicket> {
        let text = std::mem::take(&mut self.input);
        self.request(&text)
    }

    /// Issue a request for `place`, superseding any request still in flight.
    pub fn request(&mut self, place: &str) -> Option<RequestTicket> {
        let place = place.trim();
        if place.is_empty() {
            return None;
        }

        self.place = place.to_string();
        self.issued += 1;
        self.pending = true;
        debug!(seq = self.issued, place, "issuing forecast request");

        Some(RequestTicket { seq: self.issued, query: ForecastQuery::new(place) })
    }

    pub fn toggle_unit(&mut self) -> UnitPreference {
        self.unit = self.unit.toggled();
        self.unit
    }

    /// Apply a finished fetch. Failures leave the shown forecast untouched.
    pub fn complete(
        &mut self,
        ticket: &RequestTicket,
        result: Result<Forecast, FetchError>,
    ) -> Completion {
        if ticket.seq != self.issued {
            debug!(
                seq = ticket.seq,
                latest = self.issued,
                place = %ticket.query.place,
                "dropping superseded forecast result"
            );
            return Completion::Stale;
        }
        self.pending = false;

        match result {
            Ok(forecast) => {
                let category = classify(&forecast.today().condition_text);
                if let Some(bg) = category.background() {
                    self.background = bg;
                }
                if let Some(icon) = category.icon() {
                    self.primary_icon = icon;
                }

                info!(
                    place = %ticket.query.place,
                    location = forecast.location_label(),
                    days = forecast.days().len(),
                    ?category,
                    "forecast loaded"
                );
                self.forecast = Some(forecast);
                Completion::Applied
            }
            Err(err) => {
                warn!(place = %ticket.query.place, error = %err, "forecast fetch failed");
                Completion::Failed { notice: FETCH_FAILED_NOTICE }
            }
        }
    }

    pub fn view(&self) -> DashboardView {
        DashboardView::build(self.forecast.as_ref(), self.unit, self.background, self.primary_icon)
    }
}
