use super::*;

#[test]
fn parse_known_radio_values() {
    assert_eq!(ImageChoice::parse("url"), Some(ImageChoice::Url));
    assert_eq!(ImageChoice::parse("upload"), Some(ImageChoice::Upload));
    assert_eq!(ImageChoice::parse("nenhuma"), Some(ImageChoice::Omit));
    assert_eq!(ImageChoice::parse("URL"), None);
    assert_eq!(ImageChoice::parse(""), None);
}

#[test]
fn only_omit_skips_image_fields() {
    assert!(ImageChoice::Url.submits_image());
    assert!(ImageChoice::Upload.submits_image());
    assert!(!ImageChoice::Omit.submits_image());
}

#[test]
fn url_choice_enables_url_and_clears_upload() {
    let plan = ImageFieldPlan::for_choice(ImageChoice::Url);
    assert_eq!(plan.url, FieldState { visible: true, enabled: true, clear: false });
    assert_eq!(plan.upload, FieldState { visible: false, enabled: false, clear: true });
}

#[test]
fn upload_choice_enables_upload_and_clears_url() {
    let plan = ImageFieldPlan::for_choice(ImageChoice::Upload);
    assert!(plan.upload.visible && plan.upload.enabled && !plan.upload.clear);
    assert!(!plan.url.visible && !plan.url.enabled && plan.url.clear);
}

#[test]
fn omit_choice_disables_and_clears_both() {
    let plan = ImageFieldPlan::for_choice(ImageChoice::Omit);
    for field in [plan.url, plan.upload] {
        assert!(!field.visible);
        assert!(!field.enabled);
        assert!(field.clear);
    }
}
