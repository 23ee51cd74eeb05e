/*!
Reads the crate's build-time configuration and turns it into `rustc-cfg`s
that the rest of the crate can branch on.
*/

#[path = "build/config.rs"]
mod config;

fn main() {
    config::Cfgs::new().apply();
}
