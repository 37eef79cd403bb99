//! 区间合并缓存测试：插入位置、重叠 / 相邻合并、区间查找、单段覆盖判断、按偏移读取，
//! 以及随机插入序列下的不变量检查。

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::chunked_data::{ByteSpan, ChunkRange, ChunkedFileData};
use crate::range_request::RangeRequestError;
use crate::tests::{slice_data, some_data};

fn get_byte_at(file_data: &ChunkedFileData, offset: u64) -> u8 {
    let mut buf = [0u8; 1];
    file_data
        .read_to_buffer(&mut buf, 0, offset, 1)
        .unwrap_or_else(|e| panic!("偏移 {offset} 尚未加载: {e}"));
    buf[0]
}

/// 缓存中有 [100,149]、[200,249]、[300,349] 三段。
fn three_spans() -> (ChunkedFileData, Vec<u8>) {
    let data = some_data(400);
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(100, &slice_data(&data, 100, 50));
    file_data.add_data(200, &slice_data(&data, 200, 50));
    file_data.add_data(300, &slice_data(&data, 300, 50));
    (file_data, data)
}

fn assert_invariants(file_data: &ChunkedFileData) {
    for span in file_data.spans() {
        assert!(!span.is_empty(), "缓存中不应有空段");
    }
    for pair in file_data.spans().windows(2) {
        assert!(
            pair[0].end() + 1 < pair[1].offset,
            "段之间必须有间隔: {}..{} 与 {}..",
            pair[0].offset,
            pair[0].end(),
            pair[1].offset
        );
    }
}

// ═══════════════════════════ 插入 ═══════════════════════════

#[test]
fn add_span_when_empty() {
    let data = some_data(400);
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(100, &slice_data(&data, 100, 50));

    assert_eq!(file_data.len(), 1);
    assert_eq!(
        file_data.spans()[0],
        ByteSpan::new(100, slice_data(&data, 100, 50))
    );
}

#[test]
fn add_span_at_end_start_and_middle() {
    let data = some_data(400);
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(100, &slice_data(&data, 100, 50));

    file_data.add_data(200, &slice_data(&data, 200, 50));
    assert_eq!(file_data.len(), 2);
    assert_eq!(file_data.spans()[1].offset, 200);

    file_data.add_data(20, &slice_data(&data, 20, 50));
    assert_eq!(file_data.len(), 3);
    assert_eq!(file_data.spans()[0].offset, 20);

    file_data.add_data(160, &slice_data(&data, 160, 20));
    assert_eq!(file_data.len(), 4);
    assert_eq!(file_data.spans()[2], ByteSpan::new(160, slice_data(&data, 160, 20)));
    assert_invariants(&file_data);
}

#[test]
fn empty_data_is_ignored() {
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(10, &[]);
    assert!(file_data.is_empty());
}

// ═══════════════════════════ 合并 ═══════════════════════════

#[test]
fn expand_span_with_more_data_at_tail() {
    let (mut file_data, data) = three_spans();
    file_data.add_data(120, &slice_data(&data, 120, 50));

    assert_eq!(file_data.len(), 3);
    assert_eq!(file_data.spans()[0], ByteSpan::new(100, slice_data(&data, 100, 70)));
}

#[test]
fn expand_span_when_data_touches_end() {
    let (mut file_data, data) = three_spans();
    file_data.add_data(150, &slice_data(&data, 150, 20));

    assert_eq!(file_data.len(), 3);
    assert_eq!(file_data.spans()[0], ByteSpan::new(100, slice_data(&data, 100, 70)));
}

#[test]
fn expand_span_with_more_data_at_head() {
    let (mut file_data, data) = three_spans();
    file_data.add_data(80, &slice_data(&data, 80, 50));

    assert_eq!(file_data.len(), 3);
    assert_eq!(file_data.spans()[0], ByteSpan::new(80, slice_data(&data, 80, 70)));
}

#[test]
fn expand_span_when_data_touches_start() {
    let (mut file_data, data) = three_spans();
    file_data.add_data(180, &slice_data(&data, 180, 20));

    assert_eq!(file_data.len(), 3);
    assert_eq!(file_data.spans()[1], ByteSpan::new(180, slice_data(&data, 180, 70)));
}

#[test]
fn abutting_span_merges_into_one() {
    let data = some_data(400);
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(0, &slice_data(&data, 0, 30));
    file_data.add_data(30, &slice_data(&data, 30, 40));

    assert_eq!(file_data.len(), 1);
    assert_eq!(file_data.spans()[0].len(), 70);
    assert_eq!(file_data.spans()[0].data, slice_data(&data, 0, 70));
}

#[test]
fn one_byte_gap_is_not_merged() {
    let data = some_data(400);
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(0, &slice_data(&data, 0, 30));
    file_data.add_data(31, &slice_data(&data, 31, 10));

    assert_eq!(file_data.len(), 2);
    assert!(!file_data.has_data_range(0, 40));
}

#[test]
fn bridging_span_merges_three_into_one() {
    let (mut file_data, data) = three_spans();
    file_data.add_data(140, &slice_data(&data, 140, 70));

    assert_eq!(file_data.len(), 2);
    assert_eq!(file_data.spans()[0], ByteSpan::new(100, slice_data(&data, 100, 150)));
    assert_eq!(file_data.spans()[1].offset, 300);
}

#[test]
fn same_data_leaves_spans_unchanged() {
    let (mut file_data, data) = three_spans();
    file_data.add_data(100, &slice_data(&data, 100, 50));

    assert_eq!(file_data.len(), 3);
    assert_eq!(file_data.spans()[0].data, slice_data(&data, 100, 50));
}

#[test]
fn covering_data_removes_spans() {
    let (mut file_data, data) = three_spans();
    file_data.add_data(50, &slice_data(&data, 50, 220));

    assert_eq!(file_data.len(), 2);
    assert_eq!(file_data.spans()[0], ByteSpan::new(50, slice_data(&data, 50, 220)));
    assert_eq!(file_data.spans()[1].offset, 300);
}

#[test]
fn data_completely_covering_one_span() {
    let (mut file_data, data) = three_spans();
    file_data.add_data(100, &slice_data(&data, 100, 70));

    assert_eq!(file_data.len(), 3);
    assert_eq!(file_data.spans()[0].data, slice_data(&data, 100, 70));
}

#[test]
fn merge_sequence_from_overlap_touch_and_cover() {
    let (mut file_data, data) = three_spans();

    file_data.add_data(140, &slice_data(&data, 140, 20));
    assert_eq!(file_data.spans()[0].offset, 100);
    assert_eq!(file_data.spans()[0].end(), 159);

    file_data.add_data(150, &slice_data(&data, 150, 20));
    assert_eq!(file_data.spans()[0].end(), 169);
    assert_eq!(file_data.len(), 3);

    file_data.add_data(50, &slice_data(&data, 50, 220));
    assert_eq!(file_data.len(), 2);
    assert_eq!(file_data.spans()[0].offset, 50);
    assert_eq!(file_data.spans()[0].end(), 269);
    assert_eq!(file_data.spans()[0].data, slice_data(&data, 50, 220));
    assert_eq!(file_data.spans()[1].offset, 300);
}

#[test]
fn new_bytes_win_over_cached_bytes() {
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(0, &[1, 1, 1, 1]);
    file_data.add_data(2, &[9, 9, 9, 9]);

    assert_eq!(file_data.spans()[0].data, vec![1, 1, 9, 9, 9, 9]);
}

// ═══════════════════════════ 区间查找 ═══════════════════════════

#[test]
fn chunk_range_when_no_spans() {
    let file_data = ChunkedFileData::new();
    assert_eq!(
        file_data.chunk_range(100, 200),
        ChunkRange {
            start_ix: None,
            end_ix: None,
            insert_ix: 0
        }
    );
}

#[test]
fn chunk_range_not_found() {
    let (file_data, _) = three_spans();

    // 在所有段之前 / 之后 / 两段之间
    for (start, end, insert_ix) in [(50, 70, 0), (500, 600, 3), (170, 190, 1)] {
        let range = file_data.chunk_range(start, end);
        assert!(!range.is_found(), "{start}..{end}");
        assert_eq!(range.insert_ix, insert_ix, "{start}..{end}");
    }
}

#[test]
fn chunk_range_found() {
    let (file_data, _) = three_spans();

    let cases = [
        // 完全覆盖一段
        (170, 270, 1, 1),
        // 覆盖多段
        (50, 500, 0, 2),
        // 被一段完全包含
        (210, 240, 1, 1),
        // 头部部分重叠
        (210, 270, 1, 1),
        // 尾部部分重叠
        (170, 210, 1, 1),
        // 左侧相邻
        (170, 199, 1, 1),
        // 右侧相邻
        (250, 270, 1, 1),
    ];
    for (start, end, start_ix, end_ix) in cases {
        let range = file_data.chunk_range(start, end);
        assert_eq!(range.start_ix, Some(start_ix), "{start}..{end} start_ix");
        assert_eq!(range.end_ix, Some(end_ix), "{start}..{end} end_ix");
    }
}

// ═══════════════════════════ has_data_range ═══════════════════════════

#[test]
fn has_data_range_cases() {
    let (file_data, _) = three_spans();

    assert!(!file_data.has_data_range(400, 500), "在所有段之后");
    assert!(!file_data.has_data_range(270, 290), "在两段之间");
    assert!(!file_data.has_data_range(230, 270), "部分重叠");
    assert!(file_data.has_data_range(210, 240), "被一段包含");
    assert!(file_data.has_data_range(200, 249), "与一段完全一致");
    assert!(!file_data.has_data_range(200, 250), "多出 1 字节");
}

#[test]
fn has_data_range_false_across_two_spans() {
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(0, &[0; 10]);
    file_data.add_data(20, &[0; 10]);

    assert!(!file_data.has_data_range(5, 25));

    file_data.add_data(10, &[0; 10]);
    assert_eq!(file_data.len(), 1);
    assert!(file_data.has_data_range(5, 25));
}

// ═══════════════════════════ 读取 ═══════════════════════════

#[test]
fn read_data_when_offsets_match() {
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(0, &[0x01, 0x02, 0x03, 0x04, 0x05]);
    assert_eq!(get_byte_at(&file_data, 2), 0x03);
}

#[test]
fn read_data_when_offsets_are_mapped() {
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(100, &[0x01, 0x02, 0x03, 0x04, 0x05]);
    assert_eq!(get_byte_at(&file_data, 102), 0x03);
}

#[test]
fn read_data_from_the_right_span() {
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(0, &[0x00, 0x01, 0x02]);
    file_data.add_data(100, &[0x01, 0x02, 0x03, 0x04, 0x05]);
    file_data.add_data(200, &[0x06]);

    assert_eq!(get_byte_at(&file_data, 102), 0x03);
    assert_eq!(get_byte_at(&file_data, 200), 0x06);
}

#[test]
fn read_back_every_inserted_offset() {
    let data = some_data(400);
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(37, &slice_data(&data, 37, 123));

    for offset in 37..160u64 {
        assert_eq!(get_byte_at(&file_data, offset), data[offset as usize]);
    }
}

#[test]
fn read_into_buffer_at_offset() {
    let data = some_data(400);
    let mut file_data = ChunkedFileData::new();
    file_data.add_data(100, &slice_data(&data, 100, 50));

    let mut buf = [0xffu8; 8];
    let n = file_data.read_to_buffer(&mut buf, 3, 110, 5).unwrap();
    assert_eq!(n, 5);
    assert_eq!(&buf[..3], &[0xff; 3]);
    assert_eq!(&buf[3..], &data[110..115]);
}

#[test]
fn read_not_loaded_range_fails() {
    let (file_data, _) = three_spans();
    let mut buf = [0u8; 20];

    let err = file_data.read_to_buffer(&mut buf, 0, 140, 20).unwrap_err();
    assert!(matches!(
        err,
        RangeRequestError::RangeNotLoaded {
            position: 140,
            length: 20
        }
    ));
}

#[test]
fn read_beyond_target_buffer_fails() {
    let (file_data, _) = three_spans();
    let mut buf = [0u8; 4];

    let err = file_data.read_to_buffer(&mut buf, 2, 100, 4).unwrap_err();
    assert!(matches!(err, RangeRequestError::BufferTooSmall { capacity: 4, .. }));
}

// ═══════════════════════════ 不变量 ═══════════════════════════

#[test]
fn random_inserts_keep_invariants_and_content() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let data = some_data(4096);

    for _ in 0..20 {
        let mut file_data = ChunkedFileData::new();
        for _ in 0..60 {
            let offset = rng.gen_range(0..4000usize);
            let len = rng.gen_range(1..=(4096 - offset).min(120));
            file_data.add_data(offset as u64, &slice_data(&data, offset, len));

            assert_invariants(&file_data);
            assert!(file_data.has_data_range(offset as u64, (offset + len - 1) as u64));
        }
        for span in file_data.spans() {
            let start = span.offset as usize;
            assert_eq!(span.data, data[start..start + span.data.len()]);
        }
    }
}
