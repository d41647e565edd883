use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;
use tracing::warn;

use crate::api::{connection_api, match_api};
use crate::models::{ConnectionRecord, ProfileRecord};

pub const MATCHES_PER_PAGE: i64 = 10;

#[derive(Debug, Deserialize, Default)]
pub struct MatchesQuery {
    pub page: Option<i64>,
    pub q: Option<String>,
    pub religion: Option<String>,
    pub marital_status: Option<String>,
    pub location: Option<String>,
    pub notice: Option<String>,
}

/// Filter values as applied, echoed back into the form.
#[derive(Clone, Default)]
pub struct AppliedMatchFilters {
    pub search_query: String,
    pub religion_value: String,
    pub marital_status_value: String,
    pub location_value: String,
}

/// Interest the viewer has shown toward a candidate, derived from the
/// connection snapshot on every pass. Never persisted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestState {
    None,
    Pending,
    Accepted,
}

impl InterestState {
    fn from_status(status: &str) -> Self {
        match status.trim() {
            "accepted" => InterestState::Accepted,
            "pending" => InterestState::Pending,
            // rejected and other terminal states render no badge, so the
            // candidate can be approached again if the backend allows it
            _ => InterestState::None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, InterestState::None)
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, InterestState::Accepted)
    }

    pub fn badge_label(&self) -> &'static str {
        match self {
            InterestState::None => "",
            InterestState::Pending => "Interest Sent",
            InterestState::Accepted => "Connected",
        }
    }
}

pub struct MatchCardView {
    pub user_id: i64,
    pub title: String,
    pub religion_label: String,
    pub marital_status_label: String,
    pub occupation_label: String,
    pub education_label: String,
    pub location_label: String,
    pub photo_src: Option<String>,
    pub interest: InterestState,
}

pub struct MatchesPageData {
    pub cards: Vec<MatchCardView>,
    pub filters: AppliedMatchFilters,
    pub page: i64,
    pub has_prev: bool,
    pub has_next: bool,
    pub error: Option<String>,
}

/// Map candidate user id to the viewer's interest state. Only connections the
/// viewer sent count; incoming interest is not surfaced on match cards. If
/// the backend ever returns more than one outgoing connection for the same
/// receiver, the last one in iteration order wins — a tolerance, not a
/// guarantee.
pub fn build_interest_map(
    connections: &[ConnectionRecord],
    current_user_id: i64,
) -> HashMap<i64, InterestState> {
    let mut map = HashMap::new();
    for conn in connections {
        if conn.sender_id != current_user_id {
            continue;
        }
        map.insert(conn.receiver_id, InterestState::from_status(&conn.status));
    }
    map
}

/// Client-side filtering of the currently loaded page. Full rescan on every
/// change; the page is small enough that nothing smarter is warranted.
pub fn filter_candidates<'a>(
    candidates: &'a [ProfileRecord],
    filters: &AppliedMatchFilters,
) -> Vec<&'a ProfileRecord> {
    candidates
        .iter()
        .filter(|c| matches_filters(c, filters))
        .collect()
}

fn matches_filters(candidate: &ProfileRecord, filters: &AppliedMatchFilters) -> bool {
    let name_ok = filters.search_query.is_empty() || {
        let full_name =
            format!("{} {}", candidate.first_name, candidate.last_name).to_lowercase();
        full_name.contains(&filters.search_query.to_lowercase())
    };

    let religion_ok = filters.religion_value.is_empty()
        || candidate.religion.as_deref() == Some(filters.religion_value.as_str());

    let marital_ok = filters.marital_status_value.is_empty()
        || candidate.marital_status == filters.marital_status_value;

    // Location match stays case-sensitive, matching the site's historical
    // behavior.
    let location_ok = filters.location_value.is_empty()
        || [
            candidate.location_city.as_deref(),
            candidate.location_state.as_deref(),
            candidate.location_country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.contains(&filters.location_value));

    name_ok && religion_ok && marital_ok && location_ok
}

/// Age in whole years as of `as_of`, one less if this year's birthday is
/// still ahead. Tuple comparison on (month, day) handles Feb 29 without a
/// special case.
pub fn compute_age(date_of_birth: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - date_of_birth.year();
    if (as_of.month(), as_of.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

fn age_from_dob(date_of_birth: &str, as_of: NaiveDate) -> Option<i32> {
    NaiveDate::parse_from_str(date_of_birth.trim(), "%Y-%m-%d")
        .ok()
        .map(|dob| compute_age(dob, as_of))
}

pub async fn build_matches_page(
    token: &str,
    current_user_id: i64,
    query: &MatchesQuery,
) -> MatchesPageData {
    let filters = applied_filters(query);
    let page = query.page.unwrap_or(1).max(1);
    let skip = (page - 1) * MATCHES_PER_PAGE;

    let candidates = match match_api::find_matches(token, skip, MATCHES_PER_PAGE).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!(status = %e.status, "Match fetch failed");
            let message = e
                .detail()
                .unwrap_or_else(|| "Failed to load matches. Please try again later.".to_string());
            return MatchesPageData {
                cards: vec![],
                filters,
                page,
                has_prev: page > 1,
                has_next: false,
                error: Some(message),
            };
        }
    };

    // Interest badges are supplementary: when the connections fetch fails the
    // page still renders, just with every card in the "no interest" state.
    let interest_map = match connection_api::my_connections(token).await {
        Ok(connections) => build_interest_map(&connections, current_user_id),
        Err(e) => {
            warn!(status = %e.status, "Connections fetch failed, rendering without interest state");
            HashMap::new()
        }
    };

    let today = Local::now().date_naive();
    let has_next = candidates.len() as i64 == MATCHES_PER_PAGE;
    let cards = filter_candidates(&candidates, &filters)
        .into_iter()
        .map(|candidate| make_card(candidate, &interest_map, today))
        .collect();

    MatchesPageData {
        cards,
        filters,
        page,
        has_prev: page > 1,
        has_next,
        error: None,
    }
}

fn applied_filters(query: &MatchesQuery) -> AppliedMatchFilters {
    AppliedMatchFilters {
        search_query: query.q.as_deref().unwrap_or("").trim().to_string(),
        religion_value: query.religion.as_deref().unwrap_or("").trim().to_string(),
        marital_status_value: query
            .marital_status
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string(),
        location_value: query.location.as_deref().unwrap_or("").trim().to_string(),
    }
}

fn make_card(
    profile: &ProfileRecord,
    interest_map: &HashMap<i64, InterestState>,
    today: NaiveDate,
) -> MatchCardView {
    let title = match age_from_dob(&profile.date_of_birth, today) {
        Some(age) => format!("{} {}, {}", profile.first_name, profile.last_name, age),
        None => format!("{} {}", profile.first_name, profile.last_name),
    };

    let location_label = [
        profile.location_city.as_deref(),
        profile.location_state.as_deref(),
        profile.location_country.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    MatchCardView {
        user_id: profile.user_id,
        title,
        religion_label: label_or(profile.religion.as_deref(), "Not specified"),
        marital_status_label: profile.marital_status.replace('_', " "),
        occupation_label: label_or(profile.occupation.as_deref(), "Occupation not specified"),
        education_label: label_or(profile.education.as_deref(), "Education not specified"),
        location_label,
        photo_src: profile
            .profile_photo
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(photo_proxy_path),
        interest: interest_map
            .get(&profile.user_id)
            .copied()
            .unwrap_or(InterestState::None),
    }
}

fn label_or(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

/// Backend photo urls are paths like `/uploads/profile_photos/x.jpg`; they
/// are served to the browser through our authenticated proxy.
fn photo_proxy_path(url: &str) -> String {
    format!("/photos/{}", url.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(user_id: i64, first_name: &str, last_name: &str) -> ProfileRecord {
        ProfileRecord {
            profile_id: user_id * 100,
            user_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender: "female".to_string(),
            date_of_birth: "1996-06-01".to_string(),
            marital_status: "never_married".to_string(),
            height: None,
            religion: None,
            caste: None,
            mother_tongue: None,
            about_me: None,
            occupation: None,
            education: None,
            income_bracket: None,
            location_city: None,
            location_state: None,
            location_country: None,
            profile_photo: None,
        }
    }

    fn connection(sender_id: i64, receiver_id: i64, status: &str) -> ConnectionRecord {
        ConnectionRecord {
            connection_id: sender_id * 1000 + receiver_id,
            sender_id,
            receiver_id,
            status: status.to_string(),
            connection_date: None,
            last_updated: None,
        }
    }

    fn filters() -> AppliedMatchFilters {
        AppliedMatchFilters::default()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_filters_keep_every_candidate_in_order() {
        let candidates = vec![
            candidate(1, "Priya", "Shah"),
            candidate(2, "Anita", "Verma"),
            candidate(3, "Meera", "Iyer"),
        ];

        let filtered = filter_candidates(&candidates, &filters());

        assert_eq!(filtered.len(), 3);
        let ids: Vec<i64> = filtered.iter().map(|c| c.user_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn religion_mismatch_excludes_regardless_of_other_fields() {
        let mut a = candidate(1, "Priya", "Shah");
        a.religion = Some("Hindu".to_string());
        let mut b = candidate(2, "Sara", "Khan");
        b.religion = Some("Muslim".to_string());
        let c = candidate(3, "Maya", "Rao"); // religion not specified

        let mut f = filters();
        f.religion_value = "Hindu".to_string();

        let binding = [a, b, c];
        let filtered = filter_candidates(&binding, &f);
        let ids: Vec<i64> = filtered.iter().map(|c| c.user_id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn name_filter_uses_substring_semantics() {
        let candidates = vec![
            candidate(1, "Priya", "Shah"),
            candidate(2, "Priyanka", "Verma"),
            candidate(3, "Anita", "Rao"),
        ];

        let mut f = filters();
        f.search_query = "priya".to_string();

        // Case-insensitive substring over "first last", so "priya" matches
        // both Priya Shah and Priyanka Verma — not an exact-token match.
        let filtered = filter_candidates(&candidates, &f);
        let ids: Vec<i64> = filtered.iter().map(|c| c.user_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn name_filter_spans_first_and_last_name() {
        let candidates = vec![candidate(1, "Priya", "Shah")];

        let mut f = filters();
        f.search_query = "a sh".to_string();

        assert_eq!(filter_candidates(&candidates, &f).len(), 1);
    }

    #[test]
    fn location_filter_is_case_sensitive() {
        let mut a = candidate(1, "Priya", "Shah");
        a.location_city = Some("Mumbai".to_string());

        let mut f = filters();
        f.location_value = "mumbai".to_string();
        assert!(filter_candidates(std::slice::from_ref(&a), &f).is_empty());

        f.location_value = "Mumbai".to_string();
        assert_eq!(filter_candidates(std::slice::from_ref(&a), &f).len(), 1);
    }

    #[test]
    fn location_filter_matches_any_of_city_state_country() {
        let mut a = candidate(1, "Priya", "Shah");
        a.location_state = Some("Karnataka".to_string());

        let mut f = filters();
        f.location_value = "Karna".to_string();

        assert_eq!(filter_candidates(std::slice::from_ref(&a), &f).len(), 1);
    }

    #[test]
    fn accepted_connection_from_viewer_derives_accepted() {
        let connections = vec![connection(10, 2, "accepted")];

        let map = build_interest_map(&connections, 10);

        assert_eq!(map.get(&2), Some(&InterestState::Accepted));
    }

    #[test]
    fn receiver_only_connections_derive_none() {
        // The viewer never sent anything; they only received interest.
        let connections = vec![
            connection(2, 10, "pending"),
            connection(3, 10, "accepted"),
        ];

        let map = build_interest_map(&connections, 10);

        assert!(map.is_empty());
        assert_eq!(
            map.get(&2).copied().unwrap_or(InterestState::None),
            InterestState::None
        );
    }

    #[test]
    fn rejected_connection_derives_none() {
        let connections = vec![connection(10, 2, "rejected")];

        let map = build_interest_map(&connections, 10);

        assert_eq!(map.get(&2), Some(&InterestState::None));
    }

    #[test]
    fn duplicate_connections_last_one_wins() {
        let connections = vec![
            connection(10, 2, "pending"),
            connection(10, 2, "accepted"),
        ];

        let map = build_interest_map(&connections, 10);

        assert_eq!(map.get(&2), Some(&InterestState::Accepted));
    }

    #[test]
    fn age_counts_down_until_the_birthday() {
        let dob = date("2000-03-15");

        assert_eq!(compute_age(dob, date("2024-03-14")), 23);
        assert_eq!(compute_age(dob, date("2024-03-15")), 24);
        assert_eq!(compute_age(dob, date("2024-03-16")), 24);
    }

    #[test]
    fn leap_day_birthdate_needs_no_special_case() {
        let dob = date("2000-02-29");

        // In a non-leap year the birthday "hasn't happened" on Feb 28 and
        // has by Mar 1, under the same (month, day) comparison.
        assert_eq!(compute_age(dob, date("2023-02-28")), 22);
        assert_eq!(compute_age(dob, date("2023-03-01")), 23);
        assert_eq!(compute_age(dob, date("2024-02-29")), 24);
    }

    #[test]
    fn unparseable_date_of_birth_renders_name_without_age() {
        let mut a = candidate(1, "Priya", "Shah");
        a.date_of_birth = "not-a-date".to_string();

        let card = make_card(&a, &HashMap::new(), date("2024-01-01"));

        assert_eq!(card.title, "Priya Shah");
    }

    #[test]
    fn missing_optional_fields_fall_back_to_placeholders() {
        let a = candidate(1, "Priya", "Shah");

        let card = make_card(&a, &HashMap::new(), date("2024-01-01"));

        assert_eq!(card.religion_label, "Not specified");
        assert_eq!(card.occupation_label, "Occupation not specified");
        assert_eq!(card.education_label, "Education not specified");
        assert_eq!(card.location_label, "");
        assert!(card.photo_src.is_none());
    }

    #[test]
    fn reconciles_page_against_connection_snapshot() {
        // Two candidates on the page, one pending connection from the viewer
        // to the first: the first shows pending, the second shows nothing.
        let candidates = vec![candidate(21, "Priya", "Shah"), candidate(22, "Anita", "Verma")];
        let connections = vec![connection(10, 21, "pending")];

        let map = build_interest_map(&connections, 10);
        let today = date("2024-01-01");
        let cards: Vec<MatchCardView> = filter_candidates(&candidates, &filters())
            .into_iter()
            .map(|c| make_card(c, &map, today))
            .collect();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].interest, InterestState::Pending);
        assert_eq!(cards[0].interest.badge_label(), "Interest Sent");
        assert_eq!(cards[1].interest, InterestState::None);
        assert!(cards[1].interest.is_none());
    }
}
