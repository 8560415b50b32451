// 哲学者は円卓に座っているので、隣接関係は剰余で求まる

// i 番目の哲学者の (左隣, 右隣)
// n = 1 のときは自分自身が両隣になる
pub fn neighbors(i: usize, n: usize) -> (usize, usize) {
    debug_assert!(n > 0 && i < n);
    ((i + n - 1) % n, (i + 1) % n)
}

// i 番目の哲学者が使う (左の箸, 右の箸)
pub fn forks(i: usize, n: usize) -> (usize, usize) {
    debug_assert!(n > 0 && i < n);
    (i, (i + 1) % n)
}
