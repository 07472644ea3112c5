mod common;
mod fusion;
