#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod compress;
mod error;
mod md5;
mod state;

pub use error::StateDecodeError;
pub use md5::Md5;
pub use state::STATE_LEN;
