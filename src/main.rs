fn main() {
    if let Err(err) = kitti_resize::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
