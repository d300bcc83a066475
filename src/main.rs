fn main() {
    tilegrid::gpu::run();
}
