use chrono::NaiveDate;
use nef_extract::*;

const NEF_SINGLE: &str = include_str!("fixtures/nef_single.html");
const NEF_MULTI: &str = include_str!("fixtures/nef_multi_docket.html");
const NDA: &str = include_str!("fixtures/nda.html");
const NEF_PLAIN: &str = include_str!("fixtures/nef_plain.txt");

fn extract(court_id: &str, content_type: ContentType, body: &str) -> Result<NotificationData> {
    Notification::from_body(court_id, content_type, body, &ExtractorConfig::default())?.extract()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn assert_recipients_have_addresses(data: &NotificationData) {
    for recipient in &data.email_recipients {
        assert!(
            !recipient.email_addresses.is_empty(),
            "recipient {} has no address",
            recipient.name
        );
    }
}

fn assert_identifiers_all_or_nothing(data: &NotificationData) {
    for entry in data.dockets.iter().flat_map(|d| &d.docket_entries) {
        match &entry.document {
            Some(doc) => assert!(!doc.url.is_empty() && !doc.pacer_doc_id.is_empty()),
            None => assert!(entry.document_url().is_none()),
        }
    }
}

#[test]
fn test_plain_body_end_to_end() {
    let body = "Case Name:Doe v. Roe\n\
                Case Number:1:20-cv-12345\n\
                ...Docket Text:Order filed on 01/02/2020 granting motion...\
                Notice has been electronically mailed to:\n\
                John Smith, jsmith@example.com\n";

    let data = extract("mad", ContentType::Plain, body).unwrap();

    assert_eq!(data.court_id, "mad");
    assert!(!data.appellate);
    assert_eq!(data.dockets.len(), 1);

    let docket = &data.dockets[0];
    assert_eq!(docket.case_name, "Doe V. Roe");
    assert_eq!(docket.docket_number, "1:20-cv-12345");
    assert_eq!(docket.date_filed, date(2020, 1, 2));
    assert_eq!(docket.docket_entries.len(), 1);

    let entry = &docket.docket_entries[0];
    assert_eq!(entry.description, "Order filed on 01/02/2020 granting motion...");
    assert_eq!(entry.date_filed, date(2020, 1, 2));
    assert!(entry.document_number.is_none());
    assert!(entry.document.is_none());

    assert_eq!(
        data.email_recipients,
        vec![Recipient {
            name: "John Smith".into(),
            email_addresses: vec!["jsmith@example.com".into()],
        }]
    );
}

#[test]
fn test_html_single_docket() {
    let data = extract("mad", ContentType::Html, NEF_SINGLE).unwrap();

    assert!(!data.appellate);
    assert!(!data.contains_attachments);
    assert_eq!(data.dockets.len(), 1);

    let docket = &data.dockets[0];
    assert_eq!(docket.case_name, "Doe V. Roe");
    assert_eq!(docket.docket_number, "1:20-cv-12345");
    assert_eq!(docket.date_filed, date(2020, 1, 2));

    let entry = &docket.docket_entries[0];
    assert_eq!(
        entry.description,
        "ORDER granting [10] Motion to Dismiss. Signed by Judge Jane Roe on 1/2/2020. (abc)"
    );
    assert_eq!(entry.document_number.as_deref(), Some("12"));

    let document = entry.document.as_ref().unwrap();
    assert_eq!(
        document.url,
        "https://ecf.mad.uscourts.gov/doc1/09518442345?caseid=212345&de_seq_num=34&magic_num=56789012"
    );
    assert_eq!(document.pacer_doc_id, "09508442345");
    assert_eq!(document.pacer_case_id.as_deref(), Some("212345"));
    assert_eq!(document.pacer_seq_no.as_deref(), Some("34"));
    assert_eq!(document.pacer_magic_num.as_deref(), Some("56789012"));
}

#[test]
fn test_html_recipients_without_links() {
    let data = extract("mad", ContentType::Html, NEF_SINGLE).unwrap();

    assert_eq!(data.email_recipients.len(), 2);
    assert_eq!(data.email_recipients[0].name, "John Smith");
    assert_eq!(
        data.email_recipients[0].email_addresses,
        ["jsmith@example.com", "jsmith.backup@example.com"]
    );
    assert_eq!(data.email_recipients[1].name, "Mary Major");
    assert_eq!(data.email_recipients[1].email_addresses, ["mmajor@example.com"]);
    assert_recipients_have_addresses(&data);
}

#[test]
fn test_html_multi_docket() {
    let data = extract("nysd", ContentType::Html, NEF_MULTI).unwrap();

    assert!(data.contains_attachments);
    assert_eq!(data.dockets.len(), 2);

    let first = &data.dockets[0];
    assert_eq!(first.case_name, "In Re: Acme Securities Litigation");
    assert_eq!(first.docket_number, "1:21-cv-00101");
    assert_eq!(first.date_filed, date(2021, 3, 15));
    let entry = &first.docket_entries[0];
    assert_eq!(entry.document_number.as_deref(), Some("42"));
    let document = entry.document.as_ref().unwrap();
    assert_eq!(document.pacer_doc_id, "127028877653");
    assert_eq!(document.pacer_case_id.as_deref(), Some("555001"));
    assert_eq!(document.pacer_seq_no.as_deref(), Some("88"));
    assert_eq!(document.pacer_magic_num.as_deref(), Some("11223344"));

    let second = &data.dockets[1];
    assert_eq!(second.case_name, "Smith V. Acme Corp.");
    assert_eq!(second.docket_number, "1:21-cv-00202");
    let entry = &second.docket_entries[0];
    assert!(entry.document_number.is_none());
    assert!(entry.document.is_none());

    // Both dockets share the one docket text
    for docket in &data.dockets {
        assert_eq!(
            docket.docket_entries[0].description,
            "ORDER consolidating cases for pretrial purposes. So Ordered. \
             (Signed by Judge Lorna G. Schofield on 3/15/2021)"
        );
    }
    assert_identifiers_all_or_nothing(&data);
}

#[test]
fn test_html_recipients_with_links() {
    let data = extract("nysd", ContentType::Html, NEF_MULTI).unwrap();

    assert_eq!(data.email_recipients.len(), 2);
    assert_eq!(data.email_recipients[0].name, "Alice Attorney");
    assert_eq!(
        data.email_recipients[0].email_addresses,
        ["alice@lawfirm.com", "docketing@lawfirm.com"]
    );
    assert_eq!(data.email_recipients[1].name, "Bob Barrister");
    assert_eq!(data.email_recipients[1].email_addresses, ["bob@counsel.org"]);
}

#[test]
fn test_appellate_notice() {
    let data = extract("ca2", ContentType::Html, NDA).unwrap();

    assert!(data.appellate);
    assert!(!data.contains_attachments);
    assert_eq!(data.dockets.len(), 1);

    let docket = &data.dockets[0];
    assert_eq!(docket.case_name, "United States V. Acme Corp");
    assert_eq!(docket.docket_number, "21-1234");
    assert_eq!(docket.date_filed, date(2021, 3, 4));

    let entry = &docket.docket_entries[0];
    assert_eq!(
        entry.description,
        "MOTION, to extend time, on behalf of Appellant ACME Corp, FILED. \
         Service date 03/04/2021 by CM/ECF. [3012345] [21-1234]"
    );
    assert!(entry.document_number.is_none());

    let document = entry.document.as_ref().unwrap();
    assert_eq!(
        document.url,
        "https://ecf.ca2.uscourts.gov/docs1/00209876543?uid=7788990011"
    );
    assert_eq!(document.pacer_doc_id, "00209876543");
    assert_eq!(document.pacer_case_id.as_deref(), Some("45678"));
    assert!(document.pacer_seq_no.is_none());
    assert_eq!(document.pacer_magic_num.as_deref(), Some("7788990011"));
}

#[test]
fn test_appellate_recipients() {
    let data = extract("ca2", ContentType::Html, NDA).unwrap();

    assert_eq!(data.email_recipients.len(), 2);
    assert_eq!(data.email_recipients[0].name, "Mr. John Smith");
    assert_eq!(
        data.email_recipients[0].email_addresses,
        ["jsmith@example.com", "js@example.org"]
    );
    assert_eq!(
        data.email_recipients[1].name,
        "Ms. Mary Major, Assistant U.S. Attorney"
    );
    assert_eq!(data.email_recipients[1].email_addresses, ["mmajor@usdoj.gov"]);
}

#[test]
fn test_plain_notice() {
    let data = extract("mad", ContentType::Plain, NEF_PLAIN).unwrap();

    assert!(!data.appellate);
    assert!(data.contains_attachments);

    let docket = &data.dockets[0];
    assert_eq!(docket.case_name, "Doe V. Roe");
    assert_eq!(docket.docket_number, "1:20-cv-12345");
    assert_eq!(docket.date_filed, date(2020, 1, 2));

    let entry = &docket.docket_entries[0];
    assert_eq!(
        entry.description,
        "ORDER granting [10] Motion to Dismiss. Signed by Judge Jane Roe on 1/2/2020. (abc)"
    );
    assert_eq!(entry.document_number.as_deref(), Some("12"));
    let document = entry.document.as_ref().unwrap();
    assert_eq!(document.pacer_doc_id, "09508442345");
    assert_eq!(document.pacer_case_id.as_deref(), Some("212345"));
    assert_eq!(document.pacer_seq_no.as_deref(), Some("34"));
    assert_eq!(document.pacer_magic_num.as_deref(), Some("56789012"));

    let names: Vec<&str> = data.email_recipients.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["John Smith", "Mary Major"]);
    assert_eq!(
        data.email_recipients[0].email_addresses,
        ["jsmith@example.com", "jsmith.backup@example.com"]
    );
    assert_recipients_have_addresses(&data);
}

#[test]
fn test_plain_multi_docket_is_refused() {
    let body = "The following transaction was entered and filed on 1/2/2020\n\
                Case Name:Doe v. Roe\n\
                Case Number:1:20-cv-12345\n\
                Case Name:Roe v. Doe\n\
                Case Number:1:20-cv-67890\n\
                Docket Text:Order.\n\
                Notice has been electronically mailed to:\n\
                John Smith, jsmith@example.com\n";

    let err = extract("mad", ContentType::Plain, body).unwrap_err();

    assert!(matches!(
        err,
        ParseError::UnsupportedMultiDocketNotification { ref court_id, .. } if court_id == "mad"
    ));
}

#[test]
fn test_appellate_multi_docket_is_refused() {
    let table = "<table><tr><td><strong>Case Name:</strong></td><td>A v. B</td></tr>\
                 <tr><td><strong>Case Number:</strong></td><td><a href=\"/x\">21-1</a></td></tr></table>";
    let body = format!(
        "<html><body><p>Notice of Docket Activity</p><p>filed on 03/04/2021</p>\
         {table}{table}<p><strong>Docket Text:</strong> Motion</p></body></html>"
    );

    let err = extract("ca2", ContentType::Html, &body).unwrap_err();

    assert!(matches!(
        err,
        ParseError::UnsupportedMultiDocketNotification { format: "NDA", .. }
    ));
}

#[test]
fn test_missing_docket_text_is_fatal() {
    let body = NEF_SINGLE.replace("Docket Text:", "Summary:");

    let err = extract("mad", ContentType::Html, &body).unwrap_err();

    assert!(matches!(err, ParseError::MissingDocketText { .. }));
}

#[test]
fn test_missing_filing_date_is_fatal() {
    let body = NEF_PLAIN.replace("filed on", "docketed");

    let err = extract("mad", ContentType::Plain, &body).unwrap_err();

    assert!(matches!(err, ParseError::MissingFilingDate { .. }));
}

#[test]
fn test_missing_case_name_uses_default_title() {
    let body = NEF_PLAIN.replace("Case Name:           Doe v. Roe\n", "");

    let data = extract("mad", ContentType::Plain, &body).unwrap();

    assert_eq!(data.dockets[0].case_name, UNKNOWN_CASE_TITLE);
}

#[test]
fn test_case_name_in_nested_paragraph() {
    let body = NEF_SINGLE.replace("<td>Doe v. Roe</td>", "<td>\n<p>Doe v. Roe</p></td>");

    let data = extract("mad", ContentType::Html, &body).unwrap();

    assert_eq!(data.dockets[0].case_name, "Doe V. Roe");
}

#[test]
fn test_claims_filing_notice_is_unsupported() {
    let body = NEF_PLAIN.replace(
        "Notice of Electronic Filing",
        "Notice of Electronic Claims Filing",
    );

    let err = extract("nysb", ContentType::Plain, &body).unwrap_err();

    assert!(matches!(err, ParseError::UnsupportedNotice { .. }));
}

#[test]
fn test_layout_table_wrapping_notice() {
    let body = NEF_SINGLE
        .replace("<body>", "<body><table><tr><td>")
        .replace("</body>", "</td></tr></table></body>");

    let data = extract("mad", ContentType::Html, &body).unwrap();

    assert_eq!(data.dockets.len(), 1);
    assert_eq!(data.dockets[0].docket_number, "1:20-cv-12345");
}

#[test]
fn test_custom_base_url() {
    let config = ExtractorConfig {
        base_url: Some("https://ecf.test.example/".into()),
        ..ExtractorConfig::default()
    };

    let data = Notification::from_body("mad", ContentType::Html, NEF_SINGLE, &config)
        .unwrap()
        .extract()
        .unwrap();

    let url = data.dockets[0].docket_entries[0].document_url().unwrap();
    assert!(url.starts_with("https://ecf.test.example/doc1/09518442345"));
    assert!(!url.contains('#'));
}

#[test]
fn test_notification_snapshot() {
    let notification =
        Notification::from_body("ca2", ContentType::Html, NDA, &ExtractorConfig::default())
            .unwrap();

    assert_eq!(notification.court_id(), "ca2");
    assert_eq!(notification.content_type(), ContentType::Html);
    assert_eq!(notification.kind(), NoticeKind::Nda);
    assert!(notification.is_appellate());

    // Extraction reads the same snapshot every time
    assert_eq!(notification.extract().unwrap(), notification.extract().unwrap());
}

#[test]
fn test_json_output() {
    let data = extract("mad", ContentType::Html, NEF_SINGLE).unwrap();

    let json: serde_json::Value = serde_json::from_str(&data.to_json().unwrap()).unwrap();

    assert_eq!(json["court_id"], "mad");
    assert_eq!(json["appellate"], false);
    assert_eq!(json["dockets"][0]["date_filed"], "2020-01-02");
    assert_eq!(json["dockets"][0]["docket_entries"][0]["document"]["pacer_seq_no"], "34");
    assert_eq!(json["email_recipients"][1]["name"], "Mary Major");
}

fn plain_notice(docket_text: &str) -> String {
    format!(
        "Case Name:Doe v. Roe\n\
         Case Number:1:20-cv-12345\n\
         Docket Text:{docket_text}\n\
         Notice has been electronically mailed to:\n\
         John Smith, jsmith@example.com\n"
    )
}

#[test]
fn test_two_digit_filing_year() {
    let body = plain_notice("Order filed on 01/02/99 granting.");
    let data = extract("mad", ContentType::Plain, &body).unwrap();
    assert_eq!(data.dockets[0].date_filed, date(1999, 1, 2));
    assert_eq!(data.dockets[0].docket_entries[0].date_filed, date(1999, 1, 2));

    let body = plain_notice("Order filed on 1/2/20 granting.");
    let data = extract("mad", ContentType::Plain, &body).unwrap();
    assert_eq!(data.dockets[0].date_filed, date(2020, 1, 2));
}

#[test]
fn test_filing_date_reads_first_occurrence_only() {
    let body = plain_notice("Order filed on 13/45/2020, amended filed on 1/2/2020.");

    let err = extract("mad", ContentType::Plain, &body).unwrap_err();

    assert!(matches!(err, ParseError::MissingFilingDate { .. }));
}

#[test]
fn test_court_id_without_valid_host() {
    let data = extract("New York", ContentType::Plain, NEF_PLAIN).unwrap();

    assert_eq!(data.court_id, "New York");
    assert_eq!(data.dockets[0].docket_number, "1:20-cv-12345");
    // Absolute links still resolve without a court host
    assert_eq!(
        data.dockets[0].docket_entries[0].document_url(),
        Some("https://ecf.mad.uscourts.gov/doc1/09518442345?caseid=212345&de_seq_num=34&magic_num=56789012")
    );
}

#[test]
fn test_court_id_without_valid_host_drops_relative_links() {
    let data = extract("New York", ContentType::Html, NEF_SINGLE).unwrap();

    let entry = &data.dockets[0].docket_entries[0];
    assert_eq!(entry.document_number.as_deref(), Some("12"));
    assert!(entry.document.is_none());
}

#[test]
fn test_html_bare_docket_text() {
    let body = NEF_SINGLE
        .replace("<font face=\"arial\" size=\"2\"><b>", "")
        .replace("</b></font></p>", "</p>");

    let data = extract("mad", ContentType::Html, &body).unwrap();

    assert_eq!(
        data.dockets[0].docket_entries[0].description,
        "ORDER granting [10] Motion to Dismiss. Signed by Judge Jane Roe on 1/2/2020. (abc)"
    );
}

#[test]
fn test_plain_no_document_attached() {
    let body = NEF_PLAIN.replace("Document Number: 12 ", "Document Number: No document attached");

    let data = extract("mad", ContentType::Plain, &body).unwrap();

    assert!(data.dockets[0].docket_entries[0].document_number.is_none());
}
