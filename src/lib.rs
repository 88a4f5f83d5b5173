//! Sans-io decoder for the ccTalk serial protocol.
//!
//! ccTalk is a single-wire master/slave bus used by vending and
//! cash-handling peripherals (coin acceptors, bill validators, payout
//! hoppers). Every message is a self-delimiting packet
//! `[dst, len, src, cmd, data.., csum]`, where `len` declares the data byte
//! count and the trailer is either an 8-bit additive checksum or a CRC-16.
//!
//! This crate performs no I/O of its own. It consumes UART byte events that
//! an upstream decoder has already demodulated — each byte paired with its
//! [`SampleRange`] on the original signal — and produces [`Annotation`]
//! records: one per packet field plus a whole-packet summary naming the
//! command. It is meant to sit inside a signal-analysis host, but anything
//! that can supply byte events can drive it.
//!
//! The entry point is [`Framer::accept`]; see [`Framer`] for a worked
//! example. Command descriptions live in [`commands`], the integrity
//! routines in [`csum8`] and [`crc16`].

mod buffer;
mod checksum;
pub mod commands;
pub mod frame;
mod framer;
pub mod types;

pub use crate::checksum::{crc16, csum8, ChecksumKind};
pub use crate::framer::{ChecksumPolicy, DecodeError, Framer, FramerConfig, FramerState};
pub use crate::types::{Annotation, AnnotationClass, ByteEvent, Row, SampleRange, UartEvent};
