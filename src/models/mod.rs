pub mod donation;

pub use donation::DonationRequest;
