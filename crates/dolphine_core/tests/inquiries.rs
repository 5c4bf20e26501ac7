use dolphine_core::search::filter::{InquiryFilter, StatusScope, TextQuery};
use dolphine_core::{
    Department, InquiryServiceError, InquiryStatus, NewInquiry, Priority, RepoError, Storefront,
    StorefrontSettings, ValidationError,
};
use uuid::Uuid;

fn draft(name: &str, email: &str, company: Option<&str>) -> NewInquiry {
    NewInquiry {
        name: name.to_string(),
        email: email.to_string(),
        phone: "+1 555 0100".to_string(),
        company: company.map(str::to_string),
        product: Some("Vacuum Kiln".to_string()),
        message: "Please send pricing.".to_string(),
        department: Department::Sales,
    }
}

#[test]
fn submission_applies_defaults_and_trims() {
    let store = Storefront::open_in_memory(StorefrontSettings::default()).unwrap();
    let inquiries = store.inquiries().unwrap();

    let created = inquiries
        .submit(&NewInquiry {
            name: "  Lisa Chen ".to_string(),
            company: Some("   ".to_string()),
            ..draft("x", " lisa@forestpro.example ", None)
        })
        .unwrap();

    assert_eq!(created.name, "Lisa Chen");
    assert_eq!(created.email, "lisa@forestpro.example");
    assert_eq!(created.company, None);
    assert_eq!(created.product.as_deref(), Some("Vacuum Kiln"));
    assert_eq!(created.status, InquiryStatus::New);
    assert_eq!(created.priority, Priority::Medium);
    assert_eq!(created.last_reply, None);
    assert!(created.date > 0);

    assert_eq!(inquiries.get(created.id).unwrap(), created);
}

#[test]
fn submission_rejects_invalid_email() {
    let store = Storefront::open_in_memory(StorefrontSettings::default()).unwrap();
    let err = store
        .inquiries()
        .unwrap()
        .submit(&draft("Mark", "not-an-email", None))
        .unwrap_err();
    assert!(matches!(
        err,
        InquiryServiceError::Repo(RepoError::Validation(ValidationError::InvalidEmail(_)))
    ));
}

#[test]
fn triage_updates_status_priority_and_reply_time() {
    let store = Storefront::open_in_memory(StorefrontSettings::default()).unwrap();
    let inquiries = store.inquiries().unwrap();
    let created = inquiries
        .submit(&draft("Mark", "mark@mill.example", Some("Mill Co")))
        .unwrap();

    let replied = inquiries.mark_replied_at(created.id, 1_706_000_000_000).unwrap();
    assert_eq!(replied.status, InquiryStatus::Replied);
    assert_eq!(replied.last_reply, Some(1_706_000_000_000));

    let urgent = inquiries.set_priority(created.id, Priority::High).unwrap();
    assert_eq!(urgent.priority, Priority::High);
    assert_eq!(urgent.status, InquiryStatus::Replied);

    let working = inquiries
        .set_status(created.id, InquiryStatus::InProgress)
        .unwrap();
    assert_eq!(working.status, InquiryStatus::InProgress);
    assert_eq!(working.last_reply, Some(1_706_000_000_000));

    let archived = inquiries.archive(created.id).unwrap();
    assert_eq!(archived.status, InquiryStatus::Archived);
    assert_eq!(inquiries.get(created.id).unwrap(), archived);
}

#[test]
fn unknown_inquiry_is_not_found_but_delete_succeeds() {
    let store = Storefront::open_in_memory(StorefrontSettings::default()).unwrap();
    let inquiries = store.inquiries().unwrap();
    let missing = Uuid::new_v4();

    assert!(matches!(
        inquiries.get(missing),
        Err(InquiryServiceError::InquiryNotFound(id)) if id == missing
    ));
    assert!(matches!(
        inquiries.archive(missing),
        Err(InquiryServiceError::InquiryNotFound(id)) if id == missing
    ));
    assert!(!inquiries.delete(missing).unwrap());
}

#[test]
fn list_is_newest_first_and_filterable() {
    let store = Storefront::open_in_memory(StorefrontSettings::default()).unwrap();
    let inquiries = store.inquiries().unwrap();
    let lisa = inquiries
        .submit(&draft("Lisa", "lisa@forestpro.example", Some("Forest Pro")))
        .unwrap();
    let mark = inquiries
        .submit(&draft("Mark", "mark@mill.example", Some("Mill Co")))
        .unwrap();
    let ana = inquiries
        .submit(&draft("Ana", "ana@cabinets.example", None))
        .unwrap();
    inquiries.mark_replied(mark.id).unwrap();

    let all: Vec<_> = inquiries
        .list(&InquiryFilter::default())
        .unwrap()
        .into_iter()
        .map(|inquiry| inquiry.id)
        .collect();
    assert_eq!(all, vec![ana.id, mark.id, lisa.id]);

    let fresh = inquiries
        .list(&InquiryFilter {
            status: StatusScope::parse("new").unwrap(),
            ..InquiryFilter::default()
        })
        .unwrap();
    assert_eq!(fresh.len(), 2);

    let by_company = inquiries
        .list(&InquiryFilter {
            text: TextQuery::new("forest"),
            ..InquiryFilter::default()
        })
        .unwrap();
    assert_eq!(by_company.len(), 1);
    assert_eq!(by_company[0].id, lisa.id);

    assert!(StatusScope::parse("closed").is_err());

    let recent = inquiries.recent(2).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, ana.id);
}

#[test]
fn summary_counts_each_status() {
    let store = Storefront::open_in_memory(StorefrontSettings::default()).unwrap();
    let inquiries = store.inquiries().unwrap();
    let first = inquiries
        .submit(&draft("Lisa", "lisa@forestpro.example", None))
        .unwrap();
    let second = inquiries
        .submit(&draft("Mark", "mark@mill.example", None))
        .unwrap();
    inquiries
        .submit(&draft("Ana", "ana@cabinets.example", None))
        .unwrap();
    inquiries.mark_replied(first.id).unwrap();
    inquiries.archive(second.id).unwrap();

    let summary = inquiries.summary().unwrap();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.new, 1);
    assert_eq!(summary.replied, 1);
    assert_eq!(summary.in_progress, 0);
    assert_eq!(summary.archived, 1);
    assert_eq!(summary.count(InquiryStatus::Archived), 1);
}
