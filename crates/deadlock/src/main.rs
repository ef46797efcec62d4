// Copyright © Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Command line front end for deadlock detection and its run history

#![forbid(unsafe_code)]

use clap::Parser;
use deadlock::Tool;
use std::process::exit;

#[tokio::main]
async fn main() {
    // Run the corresponding tools
    let result = Tool::parse().execute().await;

    // At this point, we'll want to print and determine whether to exit for an error code
    match result {
        Ok(inner) => println!("{}", inner),
        Err(inner) => {
            println!("{}", inner);
            exit(1);
        },
    }
}
