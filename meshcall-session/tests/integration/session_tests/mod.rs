mod test_media_toggles;
mod test_peer_left_then_rejoin;
mod test_signaling_loss;
