mod test_replace_video_on_all_connections;
mod test_screen_share_commands;
