// UO Codec
// Copyright (c) 2026 The UO Codec Project Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::process;

use uo_codec::{count_samples, FrameDecoder, Result, UoReader};

use clap::{App, Arg};
use log::{error, info};

mod output;

use output::{OutputFormat, WavWriter};

fn main() {
    pretty_env_logger::init();

    let matches = App::new("UO Convert")
        .version("1.0")
        .about("Convert UO voice recordings to WAV with uo-codec")
        .arg(
            Arg::with_name("mulaw")
                .long("mulaw")
                .help("Write G.711 mu-law samples instead of 16-bit PCM"),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("The input UO file path")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("The output WAV file path")
                .required(true)
                .index(2),
        )
        .get_matches();

    let input_path = matches.value_of("INPUT").unwrap();
    let output_path = matches.value_of("OUTPUT").unwrap();

    let format = if matches.is_present("mulaw") {
        OutputFormat::MuLaw
    }
    else {
        OutputFormat::Pcm16
    };

    if let Err(err) = transcode(input_path, output_path, format) {
        error!("failed to convert {}. reason? {}", input_path, err);
        process::exit(1);
    }
}

fn transcode(input_path: &str, output_path: &str, format: OutputFormat) -> Result<()> {
    let stream = fs::read(input_path)?;

    // The WAV header leads with the total sample count, so size the stream
    // with a counting pass before decoding.
    let sample_count = count_samples(&stream)?;

    info!("converting {} to {} ({} samples)", input_path, output_path, sample_count);

    let out = BufWriter::new(File::create(output_path)?);
    let mut writer = WavWriter::new(out, format, sample_count);
    writer.write_header()?;

    let mut decoder = FrameDecoder::new();
    let mut reader = UoReader::new(&stream);

    while let Some(frame) = reader.next_frame()? {
        if frame.reset {
            decoder.reset();
        }
        writer.write_samples(&decoder.decode_frame(frame.data))?;
    }

    writer.finish()?;

    Ok(())
}
