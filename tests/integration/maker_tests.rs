//! Maker-note lens resolution tests.
//!
//! Tests verify:
//! - Panasonic lens names are read from the maker note in both byte orders
//! - A maker note that cannot be read leaves the standard lens value alone
//! - Other manufacturers keep the LensModel tag

use exif_overlay::{decode, find_binary, read_exif, ExifTag, Fraction, Maker};

use super::test_utils::{
    panasonic_g9, panasonic_maker_note, ByteOrderType, ExifJpegBuilder, IfdBuilder,
};

#[test]
fn test_panasonic_lens_from_maker_note() {
    let info = decode(&panasonic_g9(ByteOrderType::LittleEndian));

    assert_eq!(info.camera_maker, "Panasonic");
    assert_eq!(info.camera_model, "DC-G9");
    assert_eq!(info.lens_name, "LEICA DG 12-60/F2.8-4.0");
    assert_eq!(info.exposure_time, Fraction::new(10, 2500));
    assert_eq!(info.f_number, Fraction::new(40, 10));
    assert_eq!(info.iso_speed_ratings, 200);
}

#[test]
fn test_panasonic_big_endian() {
    let info = decode(&panasonic_g9(ByteOrderType::BigEndian));
    assert_eq!(info.lens_name, "LEICA DG 12-60/F2.8-4.0");
}

#[test]
fn test_maker_note_overrides_lens_model() {
    let data = ExifJpegBuilder::new()
        .zeroth(IfdBuilder::new().ascii(271, "Panasonic"))
        .exif(
            IfdBuilder::new()
                .ascii(42036, "Generic Lens")
                .panasonic_note("LUMIX G VARIO 12-35/F2.8"),
        )
        .build();

    assert_eq!(decode(&data).lens_name, "LUMIX G VARIO 12-35/F2.8");
}

#[test]
fn test_panasonic_without_maker_note_keeps_lens_model() {
    let data = ExifJpegBuilder::new()
        .zeroth(IfdBuilder::new().ascii(271, "Panasonic"))
        .exif(IfdBuilder::new().ascii(42036, "Generic Lens"))
        .build();

    assert_eq!(decode(&data).lens_name, "Generic Lens");
}

#[test]
fn test_unreadable_maker_note_keeps_lens() {
    // Maker note whose inner IFD declares far more entries than it holds
    let mut note = b"Panasonic\0\0\0".to_vec();
    note.extend(0x4000u16.to_le_bytes());
    note.extend([0u8; 10]);

    let data = ExifJpegBuilder::new()
        .zeroth(IfdBuilder::new().ascii(271, "Panasonic").ascii(272, "DC-S5"))
        .exif(
            IfdBuilder::new()
                .ascii(42036, "Standard Lens")
                .undefined(37500, &note),
        )
        .build();

    let info = decode(&data);
    assert_eq!(info.camera_model, "DC-S5");
    assert_eq!(info.lens_name, "Standard Lens");
}

#[test]
fn test_maker_note_without_lens_tag() {
    let mut note = b"Panasonic\0\0\0".to_vec();
    note.extend(1u16.to_le_bytes());
    note.extend(0x0001u16.to_le_bytes());
    note.extend(3u16.to_le_bytes());
    note.extend(1u32.to_le_bytes());
    note.extend([2, 0, 0, 0]);
    note.extend(0u32.to_le_bytes());

    let data = ExifJpegBuilder::new()
        .zeroth(IfdBuilder::new().ascii(271, "Panasonic"))
        .exif(IfdBuilder::new().undefined(37500, &note))
        .build();

    assert_eq!(decode(&data).lens_name, "?");
}

#[test]
fn test_other_makers_ignore_maker_note() {
    let data = ExifJpegBuilder::new()
        .zeroth(IfdBuilder::new().ascii(271, "OLYMPUS IMAGING CORP."))
        .exif(
            IfdBuilder::new()
                .ascii(42036, "M.Zuiko 25mm F1.2")
                .panasonic_note("Should Not Be Used"),
        )
        .build();

    let exif = read_exif(&data).unwrap();
    let maker = Maker::from_camera_maker(exif.text(ExifTag::Make).unwrap());
    assert_eq!(maker, Maker::Olympus);
    assert_eq!(maker.resolve_lens_name(&exif), None);

    assert_eq!(decode(&data).lens_name, "M.Zuiko 25mm F1.2");
}

#[test]
fn test_maker_note_located_by_content() {
    let data = panasonic_g9(ByteOrderType::LittleEndian);
    let exif = read_exif(&data).unwrap();

    let note = exif
        .find(ExifTag::MakerNote)
        .and_then(|e| e.value.as_bytes())
        .unwrap();
    let position = find_binary(&data, note).unwrap();
    assert_eq!(&data[position..position + 9], b"Panasonic");

    assert_eq!(
        Maker::Panasonic.resolve_lens_name(&exif).as_deref(),
        Some("LEICA DG 12-60/F2.8-4.0")
    );
}

#[test]
fn test_note_builder_layout() {
    let note = panasonic_maker_note(ByteOrderType::LittleEndian, 100, "ABC");
    // header, count, two entries, next pointer, "ABC\0"
    assert_eq!(note.len(), 12 + 2 + 24 + 4 + 4);
    assert_eq!(&note[note.len() - 4..], b"ABC\0");
}
