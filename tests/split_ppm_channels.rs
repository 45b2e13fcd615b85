use ppm_channel_splitter::{split_ppm_channels, CLIParser, ColorChannel, Error};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BINARY_IMAGE: &[u8] = b"P6\n2 1\n255\n\x01\x02\x03\x04\x05\x06";
const TEXT_IMAGE: &str = "P3\n# two by two\n2\n2\n255\n255 0 0   0 255 0\n0 0 255   255 0 0\n";

fn write_input_image(directory: &TempDir, file_name: &str, content: &[u8]) -> PathBuf {
    let path = directory.path().join(file_name);
    fs::write(&path, content).expect("Writing of input image failed");
    path
}

fn run_splitter(input_image_path: &Path, block_size: usize) -> ppm_channel_splitter::Result<()> {
    let mut cli_parser = CLIParser::new();
    let block_size = block_size.to_string();
    let arguments = cli_parser.parse(vec![
        "test",
        "-s",
        &block_size,
        "-f",
        input_image_path.to_str().unwrap(),
    ]);
    split_ppm_channels(&arguments).map(|_| ())
}

fn read_output(directory: &TempDir, file_name: &str) -> Vec<u8> {
    fs::read(directory.path().join(file_name)).expect("Output file was not created")
}

fn read_report(directory: &TempDir, file_name: &str) -> String {
    String::from_utf8(read_output(directory, file_name)).unwrap()
}

#[test]
fn split_binary_image_with_block_boundary_inside_pixel() {
    let directory = tempfile::tempdir().unwrap();
    let input = write_input_image(&directory, "sample.ppm", BINARY_IMAGE);
    run_splitter(&input, 4).expect("Splitting failed");

    assert_eq!(read_report(&directory, "r_sample.txt"), "red\tcount\n1\t1\n4\t1\n");
    assert_eq!(read_report(&directory, "g_sample.txt"), "green\tcount\n2\t1\n5\t1\n");
    assert_eq!(read_report(&directory, "b_sample.txt"), "blue\tcount\n3\t1\n6\t1\n");

    let header = b"P6\n2 1\n255\n";
    let expected_images: [(&str, [u8; 6]); 3] = [
        ("r_sample.ppm", [1, 0, 0, 4, 0, 0]),
        ("g_sample.ppm", [0, 2, 0, 0, 5, 0]),
        ("b_sample.ppm", [0, 0, 3, 0, 0, 6]),
    ];
    for (file_name, payload) in expected_images {
        let mut expected = header.to_vec();
        expected.extend_from_slice(&payload);
        assert_eq!(read_output(&directory, file_name), expected, "{}", file_name);
    }
}

#[test]
fn outputs_do_not_depend_on_block_size() {
    let payload: Vec<u8> = (0..48u8).map(|v| v % 5).collect();
    let mut image = b"P6\n# generated\n4 4\n255\n".to_vec();
    image.extend_from_slice(&payload);

    let reference_directory = tempfile::tempdir().unwrap();
    let reference_input = write_input_image(&reference_directory, "noise.ppm", &image);
    run_splitter(&reference_input, 3).expect("Splitting failed");

    for block_size in [1, 2, 4, 7, 4096] {
        let directory = tempfile::tempdir().unwrap();
        let input = write_input_image(&directory, "noise.ppm", &image);
        run_splitter(&input, block_size).expect("Splitting failed");
        for channel in ColorChannel::ALL {
            for extension in ["txt", "ppm"] {
                let file_name = format!("{}_noise.{}", channel.initial(), extension);
                assert_eq!(
                    read_output(&directory, &file_name),
                    read_output(&reference_directory, &file_name),
                    "{} differs for block size {}",
                    file_name,
                    block_size
                );
            }
        }
    }
}

#[test]
fn split_text_image() {
    let directory = tempfile::tempdir().unwrap();
    let input = write_input_image(&directory, "corners.ppm", TEXT_IMAGE.as_bytes());
    run_splitter(&input, 5).expect("Splitting failed");

    assert_eq!(
        read_report(&directory, "r_corners.txt"),
        "red\tcount\n255\t2\n0\t2\n"
    );
    assert_eq!(
        read_report(&directory, "b_corners.txt"),
        "blue\tcount\n0\t3\n255\t1\n"
    );
    assert_eq!(
        read_report(&directory, "r_corners.ppm"),
        "P3\n2 2\n255\n255 0 0\n0 0 0\n0 0 0\n255 0 0\n"
    );
}

#[test]
fn invalid_header_produces_no_output() {
    let directory = tempfile::tempdir().unwrap();
    let input = write_input_image(&directory, "broken.ppm", b"P6\n2 1\n");
    match run_splitter(&input, 4) {
        Err(e) => assert!(e.is_header_error(), "unexpected error: {}", e),
        Ok(_) => panic!("Incomplete header was not detected"),
    }
    let entries = fs::read_dir(directory.path()).unwrap().count();
    assert_eq!(entries, 1, "only the input file may exist");
}

#[test]
fn truncated_payload_reports_length_mismatch() {
    let directory = tempfile::tempdir().unwrap();
    let input = write_input_image(&directory, "cut.ppm", b"P6\n2 1\n255\n\x01\x02\x03\x04");
    match run_splitter(&input, 2) {
        Err(Error::ChannelLengthMismatch {
            channel,
            expected,
            actual,
        }) => {
            assert_eq!(channel, ColorChannel::Green);
            assert_eq!(expected, 2);
            assert_eq!(actual, 1);
        }
        Err(e) => panic!("Unexpected error: {}", e),
        Ok(_) => panic!("Length mismatch was not detected"),
    }
    assert_eq!(read_report(&directory, "r_cut.txt"), "red\tcount\n1\t1\n4\t1\n");
    assert!(directory.path().join("r_cut.ppm").exists());
    assert!(!directory.path().join("g_cut.ppm").exists());
}

#[test]
fn oversized_header_reports_length_mismatch() {
    let directory = tempfile::tempdir().unwrap();
    let input = write_input_image(
        &directory,
        "huge.ppm",
        b"P6\n200000 200000\n255\n\x01\x02\x03",
    );
    match run_splitter(&input, 4) {
        Err(Error::ChannelLengthMismatch {
            channel,
            expected,
            actual,
        }) => {
            assert_eq!(channel, ColorChannel::Red);
            assert_eq!(expected, 40_000_000_000);
            assert_eq!(actual, 1);
        }
        Err(e) => panic!("Unexpected error: {}", e),
        Ok(_) => panic!("Length mismatch was not detected"),
    }
    assert_eq!(read_report(&directory, "b_huge.txt"), "blue\tcount\n3\t1\n");
}

#[test]
fn block_size_beyond_file_size() {
    let directory = tempfile::tempdir().unwrap();
    let input = write_input_image(&directory, "dot.ppm", b"P6\n1 1\n255\n\x01\x02\x03");
    run_splitter(&input, 100_000_000_000_000).expect("Splitting failed");
    let mut expected = b"P6\n1 1\n255\n".to_vec();
    expected.extend_from_slice(&[0, 2, 0]);
    assert_eq!(read_output(&directory, "g_dot.ppm"), expected);
}

#[test]
fn missing_input_file() {
    let directory = tempfile::tempdir().unwrap();
    let input = directory.path().join("missing.ppm");
    assert!(matches!(
        run_splitter(&input, 8),
        Err(Error::UnableToOpenInputFileForReading(_, _))
    ));
}
