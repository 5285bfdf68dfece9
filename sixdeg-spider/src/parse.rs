use crate::record::{ExperienceEntry, ProfileRecord, SuggestionStub};
use scraper::{ElementRef, Html, Selector};

/// Extract a `ProfileRecord` from one fetched profile page.
///
/// The selectors below are a fixed structural contract with the site's
/// public-profile markup. Every field is first-match-or-absent: a missing
/// region leaves its field `None` (or the list empty) and never aborts
/// extraction of the others. A site redesign degrades to empty fields, not
/// errors. Extraction order is fixed: name, then experience cards, then
/// suggestion cards.
pub fn parse_profile(url: &str, html: &str) -> ProfileRecord {
    let document = Html::parse_document(html);
    let mut record = ProfileRecord::new(url.to_string());

    let name_selector = Selector::parse("div.profile-overview-content h1#name").unwrap();
    record.name = first_text(document.root_element(), &name_selector);

    let experience_selector = Selector::parse("section#experience > ul > li").unwrap();
    let title_selector = Selector::parse("header h4.item-title").unwrap();
    let company_selector = Selector::parse("header h5.item-subtitle").unwrap();
    let time_selector = Selector::parse("time").unwrap();

    for card in document.select(&experience_selector) {
        let mut times = card.select(&time_selector);
        record.experiences.push(ExperienceEntry {
            title: first_text(card, &title_selector),
            company: first_text(card, &company_selector),
            date_start: times.next().and_then(element_text),
            date_end: times.next().and_then(element_text),
        });
    }

    let suggestion_selector =
        Selector::parse("div#aux div.browse-map > ul > li.profile-card").unwrap();
    let anchor_selector = Selector::parse("div.info h4.item-title a").unwrap();
    let headline_selector = Selector::parse("div.info p.headline").unwrap();

    for card in document.select(&suggestion_selector) {
        let anchor = card.select(&anchor_selector).next();
        record.suggestions.push(SuggestionStub {
            // Tracking query parameters would make identical profiles look
            // distinct downstream, so they are stripped at extraction time.
            url: anchor
                .and_then(|a| a.value().attr("href"))
                .map(strip_query),
            name: anchor.and_then(element_text),
            headline: first_text(card, &headline_selector),
        });
    }

    record
}

/// Truncate a profile URL at the first query-string delimiter.
pub fn strip_query(url: &str) -> String {
    match url.split_once('?') {
        Some((path, _)) => path.to_string(),
        None => url.to_string(),
    }
}

fn first_text(scope: ElementRef, selector: &Selector) -> Option<String> {
    scope.select(selector).next().and_then(element_text)
}

fn element_text(element: ElementRef) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
