//! End-to-end decoding tests.
//!
//! Tests verify:
//! - Camera settings are read from the 0th and Exif IFDs
//! - Little-endian and big-endian blocks decode the same
//! - Earlier IFDs shadow later ones
//! - Structural damage degrades to the default record

use exif_overlay::{
    decode, read_exif, try_decode, ExifError, ExifTag, Fraction, TagValue, DEFAULT_META_INFO,
};

use super::test_utils::{
    canon_eos_r5, minimal_scan, tiff_base, ByteOrderType, ExifJpegBuilder, IfdBuilder,
};

// =============================================================================
// Happy Path
// =============================================================================

#[test]
fn test_canon_little_endian() {
    let info = decode(&canon_eos_r5(ByteOrderType::LittleEndian));

    assert_eq!(info.camera_maker, "Canon");
    assert_eq!(info.camera_model, "EOS R5");
    assert_eq!(info.lens_name, "RF24-105mm");
    assert_eq!(info.exposure_time, Fraction::new(1, 200));
    assert_eq!(info.f_number, Fraction::new(28, 10));
    assert_eq!(info.iso_speed_ratings, 400);
}

#[test]
fn test_exposure_tags_in_zeroth_ifd() {
    // Rationals out of line in the 0th IFD, only the lens in the sub-IFD
    let data = ExifJpegBuilder::new()
        .zeroth(
            IfdBuilder::new()
                .ascii(271, "Canon")
                .ascii(272, "EOS R5")
                .rational(33434, 1, 200)
                .rational(33437, 28, 10)
                .short(34855, 400),
        )
        .exif(IfdBuilder::new().ascii(42036, "RF24-105mm"))
        .build();

    let info = decode(&data);
    assert_eq!(info.camera_maker, "Canon");
    assert_eq!(info.camera_model, "EOS R5");
    assert_eq!(info.lens_name, "RF24-105mm");
    assert_eq!(info.exposure_time, Fraction::new(1, 200));
    assert_eq!(info.f_number, Fraction::new(28, 10));
    assert_eq!(info.iso_speed_ratings, 400);
}

#[test]
fn test_canon_big_endian_matches_little_endian() {
    let le = decode(&canon_eos_r5(ByteOrderType::LittleEndian));
    let be = decode(&canon_eos_r5(ByteOrderType::BigEndian));
    assert_eq!(le, be);

    let data = canon_eos_r5(ByteOrderType::BigEndian);
    assert_eq!(&data[tiff_base(&data)..tiff_base(&data) + 2], b"MM");
}

#[test]
fn test_decode_is_deterministic() {
    let data = canon_eos_r5(ByteOrderType::LittleEndian);
    assert_eq!(decode(&data), decode(&data));
    assert_eq!(decode(&[]), decode(&[]));
}

#[test]
fn test_fill_bytes_before_app1() {
    let data = ExifJpegBuilder::new()
        .with_fill_bytes(3)
        .zeroth(IfdBuilder::new().ascii(271, "NIKON CORPORATION"))
        .build();

    assert_eq!(decode(&data).camera_maker, "NIKON CORPORATION");
}

#[test]
fn test_missing_tags_use_defaults() {
    let data = ExifJpegBuilder::new()
        .zeroth(IfdBuilder::new().ascii(272, "X100V"))
        .build();

    let info = decode(&data);
    assert_eq!(info.camera_maker, "?");
    assert_eq!(info.camera_model, "X100V");
    assert_eq!(info.lens_name, "?");
    assert_eq!(info.exposure_time, Fraction::ONE);
    assert_eq!(info.f_number, Fraction::ONE);
    assert_eq!(info.iso_speed_ratings, 100);
}

#[test]
fn test_iso_as_long() {
    let data = ExifJpegBuilder::new()
        .exif(IfdBuilder::new().long(34855, 12800))
        .build();

    assert_eq!(decode(&data).iso_speed_ratings, 12800);
}

#[test]
fn test_iso_takes_first_of_many() {
    let data = ExifJpegBuilder::new()
        .exif(IfdBuilder::new().shorts(34855, &[640, 1250, 3200]))
        .build();

    assert_eq!(decode(&data).iso_speed_ratings, 640);
}

// =============================================================================
// IFD Merge Order
// =============================================================================

#[test]
fn test_zeroth_shadows_first_and_exif() {
    let data = ExifJpegBuilder::new()
        .zeroth(IfdBuilder::new().ascii(272, "Main Model"))
        .first(
            IfdBuilder::new()
                .ascii(272, "Thumbnail Model")
                .ascii(271, "Thumbnail Maker")
                .ascii(42036, "Lens From First"),
        )
        .exif(
            IfdBuilder::new()
                .ascii(271, "Exif Maker")
                .ascii(42036, "Lens From Exif")
                .rational(33437, 56, 10),
        )
        .build();

    let info = decode(&data);
    assert_eq!(info.camera_model, "Main Model");
    assert_eq!(info.camera_maker, "Thumbnail Maker");
    assert_eq!(info.lens_name, "Lens From First");
    assert_eq!(info.f_number, Fraction::new(56, 10));
}

#[test]
fn test_merged_entries_in_lookup_order() {
    let data = ExifJpegBuilder::new()
        .zeroth(IfdBuilder::new().ascii(271, "A"))
        .first(IfdBuilder::new().short(259, 6))
        .exif(IfdBuilder::new().short(34855, 100))
        .build();

    let exif = read_exif(&data).unwrap();
    let tags: Vec<Option<u16>> = exif.entries().iter().map(|e| e.tag).collect();
    assert_eq!(
        tags,
        vec![Some(271), Some(34665), Some(259), Some(34855)]
    );
}

#[test]
fn test_unknown_field_type_is_kept_as_sentinel() {
    // Type 12 (Double) is not decoded
    let data = ExifJpegBuilder::new()
        .zeroth(
            IfdBuilder::new()
                .raw(0x0131, 12, 1, [0x10, 0, 0, 0])
                .ascii(271, "Canon"),
        )
        .build();

    let exif = read_exif(&data).unwrap();
    assert_eq!(exif.entries().len(), 2);
    assert_eq!(exif.entries()[0].tag, None);
    assert_eq!(exif.entries()[0].value, TagValue::Empty);
    assert_eq!(exif.text(ExifTag::Make), Some("Canon"));
}

// =============================================================================
// Failure Handling
// =============================================================================

#[test]
fn test_tiny_inputs() {
    assert_eq!(decode(&[]), DEFAULT_META_INFO);
    assert_eq!(decode(&[0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x20, 0x45]), DEFAULT_META_INFO);
}

#[test]
fn test_not_a_jpeg() {
    let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];
    assert_eq!(decode(&png), DEFAULT_META_INFO);
    assert!(matches!(try_decode(&png), Err(ExifError::NotJpeg(0x8950))));
}

#[test]
fn test_jpeg_without_app1() {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x00, 0x00];
    data.extend(minimal_scan());

    assert_eq!(try_decode(&data), Err(ExifError::App1NotFound));
    assert_eq!(decode(&data), DEFAULT_META_INFO);
}

#[test]
fn test_short_app1_segment() {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x0A];
    data.extend([0u8; 8]);
    data.extend(minimal_scan());

    assert_eq!(try_decode(&data), Err(ExifError::SegmentTooShort(10)));
    assert_eq!(decode(&data), DEFAULT_META_INFO);
}

#[test]
fn test_xmp_app1_is_not_exif() {
    let payload = b"http://ns.adobe.com/xap/1.0/\0<x:xmpmeta/>";
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE1];
    data.extend(((payload.len() + 2) as u16).to_be_bytes());
    data.extend(payload);
    data.extend(minimal_scan());

    assert_eq!(try_decode(&data), Err(ExifError::MissingExifCode));
    assert_eq!(decode(&data), DEFAULT_META_INFO);
}

#[test]
fn test_bad_byte_order() {
    let mut data = canon_eos_r5(ByteOrderType::LittleEndian);
    let base = tiff_base(&data);
    data[base] = b'X';
    data[base + 1] = b'X';

    assert_eq!(try_decode(&data), Err(ExifError::InvalidByteOrder(0x5858)));
    assert_eq!(decode(&data), DEFAULT_META_INFO);
}

#[test]
fn test_bad_tiff_magic() {
    let mut data = canon_eos_r5(ByteOrderType::LittleEndian);
    let base = tiff_base(&data);
    data[base + 2] = 43;

    assert_eq!(try_decode(&data), Err(ExifError::InvalidMagic(43)));
    assert_eq!(decode(&data), DEFAULT_META_INFO);
}

#[test]
fn test_exif_pointer_past_end() {
    let data = ExifJpegBuilder::new()
        .zeroth(
            IfdBuilder::new()
                .ascii(271, "Canon")
                .raw(34665, 4, 1, 0x00FF_0000u32.to_le_bytes()),
        )
        .build();

    assert!(matches!(
        try_decode(&data),
        Err(ExifError::OutOfBounds { .. })
    ));
    assert_eq!(decode(&data), DEFAULT_META_INFO);
}

#[test]
fn test_value_offset_past_end() {
    // Model claims 32 bytes at an offset far outside the file
    let data = ExifJpegBuilder::new()
        .zeroth(
            IfdBuilder::new()
                .ascii(271, "Canon")
                .raw(272, 2, 32, 0x0001_0000u32.to_le_bytes()),
        )
        .build();

    assert!(matches!(
        try_decode(&data),
        Err(ExifError::OutOfBounds { .. })
    ));
    assert_eq!(decode(&data), DEFAULT_META_INFO);
}

#[test]
fn test_inflated_entry_count() {
    let mut data = canon_eos_r5(ByteOrderType::LittleEndian);
    let count_pos = tiff_base(&data) + 8;
    data[count_pos] = 0xFF;
    data[count_pos + 1] = 0x7F;

    assert!(matches!(
        try_decode(&data),
        Err(ExifError::EntryCountTooLarge { count: 0x7FFF, .. })
    ));
    assert_eq!(decode(&data), DEFAULT_META_INFO);
}

#[test]
fn test_corrupt_first_ifd_fails_whole_block() {
    let mut data = ExifJpegBuilder::new()
        .zeroth(IfdBuilder::new().ascii(271, "Canon"))
        .first(IfdBuilder::new().short(259, 6))
        .build();

    // 0th IFD: count (2) + one entry (12), then the next-IFD pointer
    let next_pos = tiff_base(&data) + 8 + 2 + 12;
    data[next_pos..next_pos + 4].copy_from_slice(&0x00F0_0000u32.to_le_bytes());

    assert_eq!(decode(&data), DEFAULT_META_INFO);
}

#[test]
fn test_truncated_file() {
    let data = canon_eos_r5(ByteOrderType::BigEndian);
    let base = tiff_base(&data);

    for cut in [base + 4, base + 20, base + 60] {
        assert_eq!(decode(&data[..cut]), DEFAULT_META_INFO, "cut at {}", cut);
    }
}
