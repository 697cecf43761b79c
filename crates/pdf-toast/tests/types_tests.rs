use pdf_toast::*;

#[test]
fn test_page_color_parsing() {
    let green: PageColor = "006600".parse().unwrap();
    assert_eq!(green, PageColor::new(0x00, 0x66, 0x00));
    assert_eq!(green, PageColor::default());

    let upper: PageColor = "FFaa10".parse().unwrap();
    assert_eq!(upper, PageColor::new(0xff, 0xaa, 0x10));
}

#[test]
fn test_page_color_components() {
    let [r, g, b] = PageColor::new(0, 0x66, 0xff).components();
    assert_eq!(r, 0.0);
    assert!((g - 0.4).abs() < 0.001);
    assert_eq!(b, 1.0);
}

#[test]
fn test_invalid_page_colors() {
    for text in ["", "06600", "0066000", "00g600", "#06600"] {
        match text.parse::<PageColor>() {
            Err(ToastError::InvalidColor(_)) => {}
            other => panic!("Expected InvalidColor for {:?}, got {:?}", text, other),
        }
    }
}

#[test]
fn test_page_color_display() {
    assert_eq!(PageColor::new(0xab, 0x01, 0x66).to_string(), "ab0166");
}

#[test]
fn test_rect_edges() {
    let rect = Rect::from_corners(35.0, 10.0, 612.0, 400.0);
    assert_eq!(rect.width, 577.0);
    assert_eq!(rect.height, 390.0);
    assert_eq!(rect.right(), 612.0);
    assert_eq!(rect.top(), 400.0);
    assert_eq!(rect.corners(), [35.0, 10.0, 612.0, 400.0]);
}

#[test]
fn test_rect_contains_and_empty() {
    let page = Rect::new(0.0, 0.0, 612.0, 792.0);
    assert!(page.contains(&Rect::new(35.0, 0.0, 577.0, 430.0)));
    assert!(!page.contains(&Rect::new(35.0, 400.0, 577.0, 430.0)));

    assert!(Rect::from_corners(700.0, 0.0, 612.0, 100.0).is_empty());
    assert!(!page.is_empty());
}
