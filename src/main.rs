fn main() {
    drag_drop_scene::run();
}
